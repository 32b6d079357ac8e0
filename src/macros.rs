macro_rules! efrom {
    ($ename:ty, $vname:ident) => {
        efrom!($ename, $vname, $vname);
    };
    ($ename:ty, $vname:ident, $sname:ty) => {
        impl From<$sname> for $ename {
            fn from(e: $sname) -> Self {
                Self::$vname(Box::new(e))
            }
        }
    };
}

macro_rules! linear_ids {
    ($ids:ident, $id:ident, $ty:ty) => {
        pub struct $ids {
            next: crate::utils::numcell::NumCell<$ty>,
        }

        impl Default for $ids {
            fn default() -> Self {
                Self {
                    next: crate::utils::numcell::NumCell::new(1),
                }
            }
        }

        impl $ids {
            pub fn next(&self) -> $id {
                $id(self.next.fetch_add(1))
            }
        }

        #[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
        pub struct $id($ty);

        #[allow(dead_code)]
        impl $id {
            pub fn raw(self) -> $ty {
                self.0
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

macro_rules! id {
    ($name:ident) => {
        #[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
        pub struct $name(u32);

        #[allow(dead_code)]
        impl $name {
            pub const NONE: Self = $name(0);

            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<crate::object::ObjectId> for $name {
            fn from(f: crate::object::ObjectId) -> Self {
                Self(f.raw())
            }
        }

        impl From<$name> for crate::object::ObjectId {
            fn from(f: $name) -> Self {
                crate::object::ObjectId::from_raw(f.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

macro_rules! bitflags {
    ($name:ident: $ty:ty; $($var:ident = $val:expr,)*) => {
        #[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
        pub struct $name(pub $ty);

        $(
            #[allow(dead_code)]
            pub const $var: $name = $name($val);
        )*

        #[allow(dead_code)]
        impl $name {
            pub const fn none() -> Self {
                Self(0)
            }

            pub const fn all() -> Self {
                Self(0 $(| $val)*)
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self::Output {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self::Output {
                Self(self.0 & rhs.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut first = true;
                let mut rem = self.0;
                $(
                    if $val != 0 && self.0 & $val == $val {
                        if !first {
                            f.write_str(" | ")?;
                        }
                        first = false;
                        f.write_str(stringify!($var))?;
                        rem &= !$val;
                    }
                )*
                if rem != 0 || first {
                    if !first {
                        f.write_str(" | ")?;
                    }
                    write!(f, "0x{:x}", rem)?;
                }
                Ok(())
            }
        }
    };
}

macro_rules! object_base {
    (self = $oname:ident; interface = $iface:ident; handler = $module:ident::$handler:ident;) => {
        impl crate::object::ObjectBase for $oname {
            fn id(&self) -> crate::object::ObjectId {
                self.id.into()
            }

            fn version(&self) -> crate::object::Version {
                self.version
            }

            fn interface(&self) -> crate::object::Interface {
                crate::object::Interface::$iface
            }

            fn handle_request(
                self: std::rc::Rc<Self>,
                request: crate::wire::Request,
            ) -> Result<(), crate::client::ClientError> {
                let crate::wire::Request::$iface(request) = request else {
                    return Err(crate::client::ClientError::InvalidMethod);
                };
                if let Err(e) =
                    <Self as crate::wire::$module::$handler>::dispatch(&*self, request, &self)
                {
                    return Err(crate::client::ClientError::ObjectError(
                        crate::client::ObjectError {
                            interface: crate::object::Interface::$iface,
                            error: Box::new(e),
                        },
                    ));
                }
                Ok(())
            }
        }
    };
}

macro_rules! simple_add_obj {
    ($ty:ty) => {
        impl crate::client::WaylandObject for $ty {}
    };
}

macro_rules! dedicated_add_obj {
    ($oname:ident, $idname:ident, $field:ident) => {
        impl crate::client::WaylandObject for $oname {
            fn add(self: std::rc::Rc<Self>, client: &crate::client::Client) {
                client.objects.$field.set(self.id, self);
            }

            fn remove(&self, client: &crate::client::Client) {
                client.objects.$field.remove(&self.id);
            }
        }

        impl crate::client::WaylandObjectLookup for crate::wire::$idname {
            type Object = $oname;
            const INTERFACE: crate::object::Interface = crate::object::Interface::$oname;

            fn lookup(client: &crate::client::Client, id: Self) -> Option<std::rc::Rc<$oname>> {
                client.objects.$field.get(&id)
            }
        }
    };
}
