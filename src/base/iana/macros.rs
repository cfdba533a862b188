//! Macros making implementing IANA types easier.

/// Creates a standard IANA type wrapping an integer.
///
/// The type is a newtype around the integer, so values without a mnemonic
/// survive a round trip through the wire format unchanged. Well-known
/// values are available as associated constants.
///
/// Values without a mnemonic are displayed as the `$fallback` prefix
/// followed by the decimal value, e.g., `TYPE65280`.
macro_rules! int_enum {
    ( $(#[$attr:meta])* =>
      $ianatype:ident, $inttype:ident, $fallback:expr;
      $( $(#[$variant_attr:meta])* ( $variant:ident =>
                                        $value:expr, $mnemonic:expr) )* ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $ianatype($inttype);

        impl $ianatype {
            $(
                $(#[$variant_attr])*
                pub const $variant: $ianatype = $ianatype($value);
            )*
        }

        impl $ianatype {
            /// Returns a value from its raw integer value.
            #[must_use]
            pub const fn from_int(value: $inttype) -> Self {
                Self(value)
            }

            /// Returns the raw integer value for a value.
            #[must_use]
            pub const fn to_int(self) -> $inttype {
                self.0
            }

            /// Returns a value from a well-defined mnemonic.
            #[must_use]
            pub fn from_mnemonic(m: &str) -> Option<Self> {
                $(
                    if m.eq_ignore_ascii_case($mnemonic) {
                        return Some($ianatype::$variant)
                    }
                )*
                None
            }

            /// Returns the mnemonic for this value if there is one.
            #[must_use]
            pub const fn to_mnemonic(self) -> Option<&'static str> {
                match self {
                    $(
                        $ianatype::$variant => Some($mnemonic),
                    )*
                    _ => None
                }
            }

            /// Returns whether the value has a well-defined mnemonic.
            pub const fn is_known(self) -> bool {
                self.to_mnemonic().is_some()
            }
        }

        //--- From

        impl From<$inttype> for $ianatype {
            fn from(value: $inttype) -> Self {
                $ianatype::from_int(value)
            }
        }

        impl From<$ianatype> for $inttype {
            fn from(value: $ianatype) -> Self {
                value.to_int()
            }
        }

        //--- FromStr

        impl core::str::FromStr for $ianatype {
            type Err = $crate::base::iana::FromStrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Some(res) = $ianatype::from_mnemonic(s) {
                    return Ok(res)
                }
                let prefix_len = $fallback.len();
                let prefix = s.get(..prefix_len);
                let value = s.get(prefix_len..);
                if let (Some(prefix), Some(value)) = (prefix, value) {
                    if prefix.eq_ignore_ascii_case($fallback) {
                        if let Ok(value) = value.parse() {
                            return Ok($ianatype::from_int(value))
                        }
                    }
                }
                Err($crate::base::iana::FromStrError)
            }
        }

        //--- Pack and Unpack

        impl $crate::base::wire::Pack for $ianatype {
            const PACK_LEN: usize =
                <$inttype as $crate::base::wire::Pack>::PACK_LEN;

            fn pack<B: bytes::BufMut + ?Sized>(&self, target: &mut B) {
                $crate::base::wire::Pack::pack(&self.0, target)
            }
        }

        impl $crate::base::wire::Unpack for $ianatype {
            const UNPACK_LEN: usize =
                <$inttype as $crate::base::wire::Unpack>::UNPACK_LEN;

            fn unpack(slice: &[u8]) -> Self {
                Self(<$inttype as $crate::base::wire::Unpack>::unpack(slice))
            }
        }

        //--- Display and Debug

        impl core::fmt::Display for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match self.to_mnemonic() {
                    Some(m) => f.write_str(m),
                    None => write!(f, "{}{}", $fallback, self.0),
                }
            }
        }

        impl core::fmt::Debug for $ianatype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match self.to_mnemonic() {
                    Some(m) => {
                        write!(f, "{}::{}", stringify!($ianatype), m)
                    }
                    None => {
                        f.debug_tuple(stringify!($ianatype))
                            .field(&self.0)
                            .finish()
                    }
                }
            }
        }

        //--- Serialize

        #[cfg(feature = "serde")]
        impl serde::Serialize for $ianatype {
            fn serialize<S: serde::Serializer>(
                &self, serializer: S
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    }
}
