mod candidate;
mod manifest_creator;
mod validator;

#[rustfmt::skip]
pub use {
    candidate::CandidateServiceImpl,
    manifest_creator::ManifestCreatorNamingConventionImpl,
};
