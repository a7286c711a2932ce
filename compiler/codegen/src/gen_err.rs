use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CodegenError {
    #[error("value {value} exceeds {bits}-bit immediate range, max {max}")]
    ImmediateOutOfRange { value: i64, bits: u32, max: i64 },
}
