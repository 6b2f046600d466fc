//! Declarative helpers for the many flat structures defined by the protocol.

/// Defines a structure whose fields are encoded in declaration order.
macro_rules! structure {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* pub $field:ident: $ty:ty, )*
        }
    ) => {
        structure!(@define [Clone, Debug, PartialEq, Eq, Hash] $(#[$meta])* $name {
            $( $(#[$field_meta])* $field: $ty, )*
        });

        impl sflow_codec::EncodeSize for $name {
            fn encode_size(&self) -> usize {
                0 $( + sflow_codec::EncodeSize::encode_size(&self.$field) )*
            }
        }
    };
    (
        @define [$($derive:ident),*] $(#[$meta:meta])* $name:ident {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[derive($($derive),*)]
        #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
        pub struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )*
        }

        impl sflow_codec::Write for $name {
            fn write(&self, buf: &mut impl bytes::BufMut) {
                $( sflow_codec::Write::write(&self.$field, buf); )*
            }
        }

        impl sflow_codec::Read for $name {
            type Cfg = ();

            fn read_cfg(
                buf: &mut impl bytes::Buf,
                _: &(),
            ) -> Result<Self, sflow_codec::Error> {
                Ok(Self {
                    $( $field: <$ty as sflow_codec::ReadExt>::read(buf)?, )*
                })
            }
        }
    };
}

/// Defines a structure made only of fixed-size fields.
macro_rules! fixed_structure {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$field_meta:meta])* pub $field:ident: $ty:ty, )*
        }
    ) => {
        structure!(@define [Clone, Copy, Debug, PartialEq, Eq, Hash] $(#[$meta])* $name {
            $( $(#[$field_meta])* $field: $ty, )*
        });

        impl sflow_codec::FixedSize for $name {
            const SIZE: usize = 0 $( + <$ty as sflow_codec::FixedSize>::SIZE )*;
        }
    };
}

/// Defines the closed set of structures known in one [`crate::format::Context`].
///
/// Each variant is bound to the tag it is written with. Encoding dispatches on the variant;
/// decoding goes through [`crate::registry::Registry`].
macro_rules! structure_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident($ty:ty) = $tag:path, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
        pub enum $name {
            $( $(#[$variant_meta])* $variant($ty), )*
        }

        impl $name {
            /// The tag this structure is written with.
            pub fn tag(&self) -> crate::format::FormatTag {
                match self {
                    $( $name::$variant(_) => $tag, )*
                }
            }
        }

        impl sflow_codec::Write for $name {
            fn write(&self, buf: &mut impl bytes::BufMut) {
                match self {
                    $( $name::$variant(value) => sflow_codec::Write::write(value, buf), )*
                }
            }
        }

        impl sflow_codec::EncodeSize for $name {
            fn encode_size(&self) -> usize {
                match self {
                    $( $name::$variant(value) => sflow_codec::EncodeSize::encode_size(value), )*
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )*
    };
}

/// Defines an open enumeration: a `u32` newtype whose registered values have names, and
/// whose unregistered values are carried unchanged.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$const_meta:meta])* $constant:ident = $value:literal => $label:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
        pub struct $name(pub u32);

        impl $name {
            $( $(#[$const_meta])* pub const $constant: Self = Self($value); )*

            /// Returns the registered name of this value, if any.
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $( $value => Some($label), )*
                    _ => None,
                }
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{}({})", stringify!($name), self.0),
                }
            }
        }

        impl sflow_codec::Write for $name {
            fn write(&self, buf: &mut impl bytes::BufMut) {
                sflow_codec::Write::write(&self.0, buf);
            }
        }

        impl sflow_codec::Read for $name {
            type Cfg = ();

            fn read_cfg(
                buf: &mut impl bytes::Buf,
                _: &(),
            ) -> Result<Self, sflow_codec::Error> {
                Ok(Self(<u32 as sflow_codec::ReadExt>::read(buf)?))
            }
        }

        impl sflow_codec::FixedSize for $name {
            const SIZE: usize = 4;
        }
    };
}
