fn main() {
    draftsmith::app::cli::run();
}
