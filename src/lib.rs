pub mod codec;
pub mod error;
pub mod models;
pub mod record;

pub use codec::{declared_eq, BindHook, Codec, CodecConfig, HookRegistry, OverlapPolicy};
pub use error::Error;
pub use record::{RawValues, RawValuesMut, Record};

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_type_alias() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());
        if let Ok(value) = ok_result {
            assert_eq!(value, 42);
        }

        let err_result: Result<i32> = Err(Error::NotAnObject { found: "null" });
        assert!(err_result.is_err());
    }

    #[test]
    fn test_reexports() {
        let codec = Codec::new(CodecConfig::default());
        assert_eq!(codec.config().overlap, OverlapPolicy::DeclaredWins);
        assert!(codec.hooks().is_empty());

        let _: Option<RawValues> = None;
        let _: Option<HookRegistry> = None;
    }
}
