pub mod chat;
pub mod condition;
pub mod enums;
pub mod result;
pub mod symptom;
pub mod upload;

pub use chat::*;
pub use condition::*;
pub use result::*;
pub use symptom::*;
pub use upload::*;
