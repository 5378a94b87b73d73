mod bootstrap;
mod config;
mod repository;

fn main() {
    bootstrap::run();
}
