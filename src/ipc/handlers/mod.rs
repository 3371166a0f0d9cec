pub mod confirm;
pub mod core;
pub mod device;
pub mod screens;

use crate::ipc::types::Request;

pub(crate) fn str_param<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params.get(key).and_then(|v| v.as_str())
}
