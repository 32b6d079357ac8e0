pub mod wlr_output_manager;
