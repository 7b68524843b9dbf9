pub mod ethereum;
pub mod impls;
pub mod traits;
