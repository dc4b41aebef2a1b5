use crate::model::types::{AtomIndex, ResidueIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("frame {index} is out of range for a trajectory of {frame_count} frames")]
    FrameOutOfRange { index: usize, frame_count: usize },

    #[error("atom {atom} is not part of the topology")]
    UnknownAtom { atom: AtomIndex },

    #[error("residue {residue} has no metadata in the topology")]
    MissingResidue { residue: ResidueIndex },

    #[error("hydrogen-bond detection failed: {details}")]
    Detector { details: String },

    #[error(transparent)]
    Selection(#[from] crate::select::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn detector(details: impl Into<String>) -> Self {
        Self::Detector {
            details: details.into(),
        }
    }
}
