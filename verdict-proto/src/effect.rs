//! Bindings for the `verdict.effect.v1` package.

pub mod v1 {
    /// Outcome of evaluating a policy rule against an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Effect {
        Unspecified = 0,
        Allow = 1,
        Deny = 2,
        NoMatch = 3,
    }

    impl Effect {
        /// Returns the value name used in the Protobuf definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Unspecified => "EFFECT_UNSPECIFIED",
                Self::Allow => "EFFECT_ALLOW",
                Self::Deny => "EFFECT_DENY",
                Self::NoMatch => "EFFECT_NO_MATCH",
            }
        }

        /// Parses a value name used in the Protobuf definition.
        pub fn from_str_name(value: &str) -> Option<Self> {
            match value {
                "EFFECT_UNSPECIFIED" => Some(Self::Unspecified),
                "EFFECT_ALLOW" => Some(Self::Allow),
                "EFFECT_DENY" => Some(Self::Deny),
                "EFFECT_NO_MATCH" => Some(Self::NoMatch),
                _ => None,
            }
        }
    }
}
