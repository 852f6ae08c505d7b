//! Enumerated tags with their wire literals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A literal that is not a member of the enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every member, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire literal
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Wire literals of every member, in declaration order
            pub fn literals() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of bank account
    AccountType as "account type" {
        Savings => "AHORROS",
        Checking => "CORRIENTE",
        TermDeposit => "PLAZO_FIJO",
        /// Demand deposit
        Demand => "VISTA",
    }
}

wire_enum! {
    /// Lifecycle status of a bank account
    AccountStatus as "account status" {
        Active => "ACTIVA",
        Inactive => "INACTIVA",
        Blocked => "BLOQUEADA",
        Closed => "CERRADA",
    }
}

wire_enum! {
    /// Direction of an account movement
    MovementType as "movement type" {
        Debit => "DEBITO",
        Credit => "CREDITO",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_literals() {
        assert_eq!(
            AccountType::literals(),
            vec!["AHORROS", "CORRIENTE", "PLAZO_FIJO", "VISTA"]
        );
        assert_eq!(
            AccountStatus::literals(),
            vec!["ACTIVA", "INACTIVA", "BLOQUEADA", "CERRADA"]
        );
        assert_eq!(MovementType::literals(), vec!["DEBITO", "CREDITO"]);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("PLAZO_FIJO".parse::<AccountType>(), Ok(AccountType::TermDeposit));
        assert_eq!(AccountStatus::Blocked.to_string(), "BLOQUEADA");

        let err = "SAVINGS".parse::<AccountType>().unwrap_err();
        assert_eq!(err.to_string(), "'SAVINGS' is not a valid account type");
    }

    #[test]
    fn test_serde_uses_wire_literals() {
        let json = serde_json::to_string(&MovementType::Credit).unwrap();
        assert_eq!(json, "\"CREDITO\"");
        let parsed: MovementType = serde_json::from_str("\"DEBITO\"").unwrap();
        assert_eq!(parsed, MovementType::Debit);
    }
}
