//! TeX rendering of figures, count tables and display names.

mod figure;
mod table;
pub mod text;

pub use figure::FigureTex;
pub use table::count_table_tex;
