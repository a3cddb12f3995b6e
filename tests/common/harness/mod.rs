//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic record creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod record;

#[allow(unused_imports)]
pub use command::MdexportCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use record::TestRecord;
