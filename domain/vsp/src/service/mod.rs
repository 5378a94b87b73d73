mod candidate;
mod manifest_creator;

#[rustfmt::skip]
pub use {
    candidate::CandidateService,
    manifest_creator::ManifestCreator,
};
