//! Typed messages of the `wlr-output-management-unstable-v1` protocol.
//!
//! Requests are delivered to a [`Client`](crate::client::Client) as values of these types
//! and events are appended to the client's outgoing queue. Encoding them for a socket is
//! the job of the transport.

macro_rules! interface {
    (
        $iface:ident, $module:ident, $id:ident, $handler:ident;
        requests {
            $($req:ident => $method:ident { $($rf:ident: $rt:ty,)* },)*
        }
        events {
            $($ev:ident { $($ef:ident: $et:ty,)* },)*
        }
    ) => {
        id!($id);

        pub mod $module {
            #[allow(unused_imports)]
            use super::*;

            $(
                #[derive(Debug, Clone, Eq, PartialEq)]
                pub struct $req {
                    pub self_id: $id,
                    $(pub $rf: $rt,)*
                }

                impl From<$req> for super::Request {
                    fn from(r: $req) -> Self {
                        super::Request::$iface(Request::$req(r))
                    }
                }

                impl crate::client::RequestMessage for $req {
                    fn self_id(&self) -> crate::object::ObjectId {
                        self.self_id.into()
                    }
                }
            )*

            #[derive(Debug)]
            pub enum Request {
                $($req($req),)*
            }

            pub trait $handler {
                type Error: std::error::Error + 'static;

                $(
                    fn $method(&self, req: $req, slf: &std::rc::Rc<Self>) -> Result<(), Self::Error>;
                )*

                fn dispatch(&self, request: Request, slf: &std::rc::Rc<Self>) -> Result<(), Self::Error> {
                    match request {
                        $(Request::$req(req) => self.$method(req, slf),)*
                    }
                }
            }

            $(
                #[derive(Debug, Clone, Eq, PartialEq)]
                pub struct $ev {
                    pub self_id: $id,
                    $(pub $ef: $et,)*
                }

                impl crate::client::EventFormatter for $ev {
                    fn id(&self) -> crate::object::ObjectId {
                        self.self_id.into()
                    }

                    fn interface(&self) -> crate::object::Interface {
                        crate::object::Interface::$iface
                    }

                    fn into_event(self) -> super::Event {
                        super::Event::$iface(Event::$ev(self))
                    }
                }
            )*

            #[derive(Debug, Clone, Eq, PartialEq)]
            pub enum Event {
                $($ev($ev),)*
            }
        }
    };
}

interface! {
    ZwlrOutputManagerV1, zwlr_output_manager_v1, ZwlrOutputManagerV1Id, ZwlrOutputManagerV1RequestHandler;
    requests {
        CreateConfiguration => create_configuration { id: ZwlrOutputConfigurationV1Id, serial: u32, },
        Stop => stop { },
    }
    events {
        Head { head: ZwlrOutputHeadV1Id, },
        Done { serial: u32, },
        Finished { },
    }
}

interface! {
    ZwlrOutputHeadV1, zwlr_output_head_v1, ZwlrOutputHeadV1Id, ZwlrOutputHeadV1RequestHandler;
    requests {
        Release => release { },
    }
    events {
        Name { name: String, },
        Description { description: String, },
        PhysicalSize { width: i32, height: i32, },
        Mode { mode: ZwlrOutputModeV1Id, },
        Enabled { enabled: i32, },
        CurrentMode { mode: ZwlrOutputModeV1Id, },
        Position { x: i32, y: i32, },
        Finished { },
    }
}

interface! {
    ZwlrOutputModeV1, zwlr_output_mode_v1, ZwlrOutputModeV1Id, ZwlrOutputModeV1RequestHandler;
    requests {
        Release => release { },
    }
    events {
        Size { width: i32, height: i32, },
        Refresh { refresh: i32, },
        Preferred { },
        Finished { },
    }
}

interface! {
    ZwlrOutputConfigurationV1, zwlr_output_configuration_v1, ZwlrOutputConfigurationV1Id, ZwlrOutputConfigurationV1RequestHandler;
    requests {
        EnableHead => enable_head { id: ZwlrOutputConfigurationHeadV1Id, head: ZwlrOutputHeadV1Id, },
        DisableHead => disable_head { head: ZwlrOutputHeadV1Id, },
        Apply => apply { },
        Test => test { },
        Destroy => destroy { },
    }
    events {
        Succeeded { },
        Failed { },
        Cancelled { },
    }
}

interface! {
    ZwlrOutputConfigurationHeadV1, zwlr_output_configuration_head_v1, ZwlrOutputConfigurationHeadV1Id, ZwlrOutputConfigurationHeadV1RequestHandler;
    requests {
        SetMode => set_mode { mode: ZwlrOutputModeV1Id, },
        SetPosition => set_position { x: i32, y: i32, },
    }
    events {
    }
}

#[derive(Debug)]
pub enum Request {
    ZwlrOutputManagerV1(zwlr_output_manager_v1::Request),
    ZwlrOutputHeadV1(zwlr_output_head_v1::Request),
    ZwlrOutputModeV1(zwlr_output_mode_v1::Request),
    ZwlrOutputConfigurationV1(zwlr_output_configuration_v1::Request),
    ZwlrOutputConfigurationHeadV1(zwlr_output_configuration_head_v1::Request),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
    ZwlrOutputManagerV1(zwlr_output_manager_v1::Event),
    ZwlrOutputHeadV1(zwlr_output_head_v1::Event),
    ZwlrOutputModeV1(zwlr_output_mode_v1::Event),
    ZwlrOutputConfigurationV1(zwlr_output_configuration_v1::Event),
    ZwlrOutputConfigurationHeadV1(zwlr_output_configuration_head_v1::Event),
}
