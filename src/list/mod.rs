//! The chunk list and the operations built on top of it.
//!
//! - [`BufferList`] - Ordered chunks plus a cached total length
//! - [`IntoChunks`] - Input shapes accepted by `append`/`prepend`
//! - [`Needle`] - Byte patterns accepted by `index_of`

mod input;
mod io;
mod numeric;
mod offset;
mod range;
mod search;
mod store;

pub use input::IntoChunks;
pub use search::Needle;
pub use store::BufferList;
