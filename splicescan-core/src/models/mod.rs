pub mod locus;
pub mod strand;
pub mod window;

// re-export for cleaner imports
pub use self::locus::Locus;
pub use self::strand::{MotifKind, Strand};
pub use self::window::Window;
