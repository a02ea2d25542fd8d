fn main() -> anyhow::Result<()> {
    popcorn_tui::cli::run()
}
