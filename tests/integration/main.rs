//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one subsystem against
//! the mock collaborators in `mock_hw`.  All tests run on the host with no
//! storage card or serial port required.

mod dispatcher_tests;
mod mock_hw;
mod replay_tests;
