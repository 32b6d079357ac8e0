//! The boundary to the code that drives the display hardware.
//!
//! An [`Output`] is owned by the backend. The output manager only observes it and is
//! notified through [`OutputDestroyListener`] when it disappears.


use {
    crate::utils::event_listener::EventSource,
    std::{cell::Cell, rc::Rc},
};

linear_ids!(OutputIds, OutputId, u64);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Mode {
    pub width: i32,
    pub height: i32,
    pub refresh_rate_millihz: u32,
}

#[derive(Clone, Debug, Default)]
pub struct MonitorInfo {
    pub modes: Vec<Mode>,
    pub preferred_mode: Option<Mode>,
    pub manufacturer: String,
    pub product: String,
    pub serial_number: String,
    pub width_mm: i32,
    pub height_mm: i32,
}

pub trait OutputDestroyListener {
    fn output_destroyed(self: Rc<Self>, output: &Rc<Output>);
}

pub struct Output {
    pub id: OutputId,
    pub name: String,
    pub monitor_info: MonitorInfo,
    pub enabled: Cell<bool>,
    pub current_mode: Cell<Option<Mode>>,
    pub position: Cell<(i32, i32)>,
    pub on_destroy: EventSource<dyn OutputDestroyListener>,
    destroyed: Cell<bool>,
}

impl Output {
    /// Creates a disabled output.
    pub fn new(ids: &OutputIds, name: &str, monitor_info: MonitorInfo) -> Rc<Self> {
        Rc::new(Self {
            id: ids.next(),
            name: name.to_string(),
            monitor_info,
            enabled: Cell::new(false),
            current_mode: Cell::new(None),
            position: Cell::new((0, 0)),
            on_destroy: Default::default(),
            destroyed: Cell::new(false),
        })
    }

    /// Returns `<make> <model> <serial> (<name>)`.
    pub fn description(&self) -> String {
        let mi = &self.monitor_info;
        format!(
            "{} {} {} ({})",
            mi.manufacturer, mi.product, mi.serial_number, self.name
        )
    }

    pub fn has_physical_size(&self) -> bool {
        self.monitor_info.width_mm > 0 && self.monitor_info.height_mm > 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Marks the output as gone and notifies all listeners exactly once.
    pub fn destroy(self: &Rc<Self>) {
        if self.destroyed.replace(true) {
            return;
        }
        log::info!("Output {} ({}) has been removed", self.name, self.id);
        for listener in self.on_destroy.take() {
            listener.output_destroyed(self);
        }
    }
}
