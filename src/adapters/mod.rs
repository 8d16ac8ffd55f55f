//! Adapters — concrete implementations of the port traits for host builds.
//!
//! | Adapter       | Implements              | Connects to                  |
//! |---------------|-------------------------|------------------------------|
//! | `fs_store`    | FileStore               | Host directory (SD stand-in) |
//! | `interpreter` | -                       | Host command loop            |
//! | `log_sink`    | EventSink               | Log output / status text     |
//! | `motion`      | MotionPort, StepperPort | Simulated planner + drivers  |
//! | `nvs`         | SettingsPort            | In-memory NVS store          |
//! | `script`      | -                       | Line tokenizer for replay    |
//! | `serial`      | EchoSink                | stdout (UART stand-in)       |

pub mod fs_store;
pub mod interpreter;
pub mod log_sink;
pub mod motion;
pub mod nvs;
pub mod script;
pub mod serial;
