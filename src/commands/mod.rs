// Register application subcommands.
// Each module corresponds to a specific `winget-refresh` command-line action.

// Prints the unified application catalog.
pub mod list;
// Runs the uninstall/cleanup/reinstall pipeline over a selection.
pub mod refresh;
// Displays the local version and checks for a newer release.
pub mod version;
