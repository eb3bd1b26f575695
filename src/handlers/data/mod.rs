//! Generic `/<entity>` and `/<entity>/<id>` handlers shared by every
//! registered entity table.

mod collection;
mod record;
mod utils;

pub use collection::{entity_get, entity_post};
pub use record::{record_delete, record_get, record_put};
