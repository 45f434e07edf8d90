pub mod callback;
pub mod command;
pub mod component;
pub mod config;
pub mod flags;
pub mod ident;
pub mod interp;
pub mod mailbox;
pub mod recorder;
pub mod tk;
pub mod widget;

pub use callback::{Callback, CallbackRegistry, Handle, LookupError};
pub use command::{Command, ListError, list_string, list_word, parse_list, quote};
pub use component::{Component, Container};
pub use config::{ConfigError, ConfigFile, Node, TabConfig, WindowConfig, parse_flags};
pub use flags::Flags;
pub use ident::{IdGenerator, child_path, window_target};
pub use interp::{EvalError, Interpreter};
pub use mailbox::{Job, PostError, Poster};
pub use recorder::Recorder;
pub use tk::{CallbackToken, Dispatcher, Tk};
pub use widget::{WidgetBase, callback_script};
