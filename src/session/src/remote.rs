//! Requests handed to the remote collaborators. Transport is up to the
//! implementor.

use std::path::PathBuf;

use cube_core::{Color, CubeState, Face, NotationError};
use serde::Serialize;

/// Everything the remote solver needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveRequest {
    pub rubik_name: String,
    pub username: String,
    pub stickers: Vec<Color>,
}

impl SolveRequest {
    pub fn new(state: &CubeState, username: &str) -> SolveRequest {
        SolveRequest {
            rubik_name: state.variant().product_name().to_owned(),
            username: username.to_owned(),
            stickers: state.solver_stickers(),
        }
    }
}

/// One photo per face, plus the cube as currently painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionRequest {
    pub original_cube: String,
    pub faces: Vec<(&'static str, PathBuf)>,
}

impl DetectionRequest {
    /// `images` are given in U, R, F, D, L, B order.
    ///
    /// # Errors
    ///
    /// If the cube has blank stickers.
    pub fn new(state: &CubeState, images: [PathBuf; 6]) -> Result<DetectionRequest, NotationError> {
        Ok(DetectionRequest {
            original_cube: state.face_notation()?,
            faces: Face::URFDLB
                .into_iter()
                .map(Face::label)
                .zip(images)
                .collect(),
        })
    }
}

/// An external service that turns a cube into a move string such as
/// `"R2 U1 F3 "`.
pub trait RemoteSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Whatever the service reports.
    fn solve(&self, request: &SolveRequest) -> Result<String, Self::Error>;
}

/// An external face recognizer. Submissions are fire-and-forget.
pub trait FaceDetector {
    fn submit(&self, request: DetectionRequest);
}
