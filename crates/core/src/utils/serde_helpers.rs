//! Serde helpers for settings and sidecar files written by hand

/// Implements `Deserialize` for a unit-only enum, matching variant names
/// without regard to case (`"Binary"`, `"binary"` and `"BINARY"` are equal).
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     LogLevel,
///     Debug => "debug",
///     Error => "error"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <::std::string::String as serde::Deserialize>::deserialize(deserializer)?;
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    enum Runner {
        Cargo,
        Nextest,
        MakeTarget,
    }

    impl_case_insensitive_deserialize!(
        Runner,
        Cargo => "cargo",
        Nextest => "nextest",
        MakeTarget => "maketarget"
    );

    #[test]
    fn test_case_insensitive_deserialize() {
        let result: Runner = serde_json::from_str(r#""nextest""#).unwrap();
        assert_eq!(result, Runner::Nextest);

        let result: Runner = serde_json::from_str(r#""CARGO""#).unwrap();
        assert_eq!(result, Runner::Cargo);

        let result: Runner = serde_json::from_str(r#""MakeTarget""#).unwrap();
        assert_eq!(result, Runner::MakeTarget);

        let result: Result<Runner, _> = serde_json::from_str(r#""cmake""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown variant 'cmake'"));
        assert!(err.contains("expected one of: cargo, nextest, maketarget"));
    }

    mod with_result_alias {
        #[allow(unused_imports)]
        use crate::error::Result;

        #[derive(Debug, PartialEq, Eq)]
        pub enum Level {
            Low,
            High,
        }

        impl_case_insensitive_deserialize!(Level, Low => "low", High => "high");
    }

    #[test]
    fn test_expands_next_to_crate_result_alias() {
        let level: with_result_alias::Level = serde_json::from_str(r#""HIGH""#).unwrap();
        assert_eq!(level, with_result_alias::Level::High);
    }
}
