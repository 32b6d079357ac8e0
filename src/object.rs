use {
    crate::{client::ClientError, wire::Request},
    std::{
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct Version(pub u32);

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub trait ObjectBase {
    fn id(&self) -> ObjectId;
    fn version(&self) -> Version;
    fn handle_request(self: Rc<Self>, request: Request) -> Result<(), ClientError>;
    fn interface(&self) -> Interface;
}

pub trait Object: ObjectBase + 'static {
    fn break_loops(self: Rc<Self>) {}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interface {
    ZwlrOutputManagerV1,
    ZwlrOutputHeadV1,
    ZwlrOutputModeV1,
    ZwlrOutputConfigurationV1,
    ZwlrOutputConfigurationHeadV1,
}

impl Interface {
    pub fn name(self) -> &'static str {
        match self {
            Interface::ZwlrOutputManagerV1 => "zwlr_output_manager_v1",
            Interface::ZwlrOutputHeadV1 => "zwlr_output_head_v1",
            Interface::ZwlrOutputModeV1 => "zwlr_output_mode_v1",
            Interface::ZwlrOutputConfigurationV1 => "zwlr_output_configuration_v1",
            Interface::ZwlrOutputConfigurationHeadV1 => "zwlr_output_configuration_head_v1",
        }
    }
}
