use wiedit::EditorConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match EditorConfig::default_path() {
        Some(path) => EditorConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{e:#}; using default settings");
            EditorConfig::default()
        }),
        None => EditorConfig::default(),
    };
    log::debug!("settings: {config:?}");

    wiedit::run_gui(config).map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
