pub mod alert;
pub mod break_record;
pub mod session;
pub mod session_kind;
pub mod user;
pub mod work_mode;
