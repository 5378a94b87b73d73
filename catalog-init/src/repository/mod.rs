mod element;

#[rustfmt::skip]
pub use {
    element::MemoryElementRepo,
};
