use {
    crate::{
        backend::{Mode, Output, OutputDestroyListener},
        client::ClientId,
        ifs::wlr_output_manager::{
            WlrOutputManagerState, zwlr_output_head_v1::ZwlrOutputHeadV1,
            zwlr_output_mode_v1::ZwlrOutputModeV1,
        },
        utils::{copyhashmap::CopyHashMap, event_listener::ListenerId},
        wire::{ZwlrOutputHeadV1Id, ZwlrOutputModeV1Id},
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
};

linear_ids!(OutputHeadIds, OutputHeadId, u64);

bitflags! {
    HeadStateChanges: u32;
    HEAD_STATE_ENABLED = 1 << 0,
    HEAD_STATE_MODE = 1 << 1,
    HEAD_STATE_POSITION = 1 << 2,
}

/// The configurable state of a head.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HeadState {
    pub enabled: bool,
    pub mode: Option<Mode>,
    pub position: (i32, i32),
}

impl HeadState {
    /// The live state of the output.
    pub fn of_output(output: &Output) -> Self {
        Self {
            enabled: output.enabled.get(),
            mode: output.current_mode.get(),
            position: output.position.get(),
        }
    }

    /// Drops the mode if the head is disabled or if the output does not advertise it.
    pub fn sanitized(mut self, output: &Output) -> Self {
        if let Some(mode) = self.mode {
            if !self.enabled || !output.monitor_info.modes.contains(&mode) {
                self.mode = None;
            }
        }
        self
    }

    pub fn changes(&self, next: &Self) -> HeadStateChanges {
        let mut changes = HeadStateChanges::none();
        if self.enabled != next.enabled {
            changes |= HEAD_STATE_ENABLED;
        }
        if self.mode != next.mode {
            changes |= HEAD_STATE_MODE;
        }
        if self.position != next.position {
            changes |= HEAD_STATE_POSITION;
        }
        changes
    }
}

/// The server-side record of one output.
pub struct OutputHead {
    pub id: OutputHeadId,
    pub output: Rc<Output>,
    pub(super) manager: Weak<WlrOutputManagerState>,
    pub(super) state: Cell<HeadState>,
    pub(super) resources: CopyHashMap<(ClientId, ZwlrOutputHeadV1Id), Rc<ZwlrOutputHeadV1>>,
    pub(super) mode_resources: CopyHashMap<(ClientId, ZwlrOutputModeV1Id), Rc<ZwlrOutputModeV1>>,
    pub(super) output_listener: Cell<Option<ListenerId>>,
    pub(super) destroyed: Cell<bool>,
}

impl OutputHead {
    pub fn state(&self) -> HeadState {
        self.state.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// The number of live head proxies across all sessions.
    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }

    pub(super) fn update(&self, next: HeadState) {
        let next = next.sanitized(&self.output);
        let changes = self.state.get().changes(&next);
        self.state.set(next);
        if changes.is_empty() {
            return;
        }
        for resource in self.resources.values() {
            resource.send_state(changes);
        }
    }

    pub(super) fn destroy(self: &Rc<Self>) {
        if self.destroyed.replace(true) {
            return;
        }
        for mode in self.mode_resources.take() {
            mode.send_finished();
            mode.make_inert();
        }
        for resource in self.resources.take() {
            resource.send_finished();
            resource.make_inert();
        }
        if let Some(manager) = self.manager.upgrade() {
            manager.heads.remove(&self.id);
        }
        if let Some(id) = self.output_listener.take() {
            self.output.on_destroy.detach(id);
        }
        log::debug!("Destroyed head of output {}", self.output.name);
    }
}

impl OutputDestroyListener for OutputHead {
    fn output_destroyed(self: Rc<Self>, _output: &Rc<Output>) {
        if let Some(manager) = self.manager.upgrade() {
            if let Some(handler) = manager.handler.get() {
                handler.head_removed(&self);
            }
        }
        self.destroy();
    }
}
