use thiserror::Error;

/// Errors raised while mapping between client, surface and logical space.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    /// The surface has no on-screen placement or a zero pixel size yet.
    #[error("surface is not laid out")]
    NotLaidOut,
    /// An affine map with a zero determinant was inverted.
    #[error("affine transform is not invertible (determinant {0})")]
    Singular(f64),
}

pub type Result<T> = std::result::Result<T, ViewportError>;
