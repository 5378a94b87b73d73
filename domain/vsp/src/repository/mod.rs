mod candidate;

#[rustfmt::skip]
pub use {
    candidate::OrchestrationTemplateCandidateRepo,
};
