//! Configuration section definitions.
//!
//! Each module corresponds to a section in `svgpng.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `export` | `[export]`   | Size, aspect lock, style, output dir |
//! | `input`  | `[input]`    | Ingestion limits                     |
//! | `render` | `[render]`   | Rendering engine settings            |

mod export;
mod input;
mod render;

pub use export::ExportConfig;
pub use input::InputConfig;
pub use render::RenderConfig;
