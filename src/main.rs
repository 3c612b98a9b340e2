//! Astra - the ASTRA.IO landing page
//!
//! One binary for every native task: serve the built client, open the hero
//! scene in a window, write the page, or render a poster frame.

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;

    use astra::config::{self, ServerConfig};
    use astra::params::SceneConfig;
    use astra::shell::{self, PageContent, ENTRY_DOCUMENT};
    use astra::{server, viewer};
    use cli::{Args, Command};

    /// Poster file written next to the page by `build --poster`
    const POSTER_FILE: &str = "hero.png";
    /// Scene time the poster shows
    const POSTER_TIME_S: f32 = 1.0;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    config::load_dotenv();

    let args = Args::parse();

    match args.command {
        Command::Serve {
            port,
            environment,
            client_dir,
        } => {
            let base = ServerConfig::from_env().context("Invalid server environment")?;
            let config = cli::server_config(base, port, environment, client_dir);

            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime
                .block_on(server::serve(config))
                .context("Server failed")?;
        }
        Command::View { width, height } => {
            viewer::run(SceneConfig::default(), cli::render_config(width, height))
                .context("Viewer failed")?;
        }
        Command::Build { out_dir, poster } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;

            let mut content = PageContent::default();
            if poster {
                let render_config = cli::render_config(640, 600);
                let image = viewer::snapshot(SceneConfig::default(), &render_config, POSTER_TIME_S)
                    .context("Failed to render poster")?;
                let path = out_dir.join(POSTER_FILE);
                image
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Wrote {}", path.display());
                content.poster = Some(POSTER_FILE.to_string());
            }

            let path = out_dir.join(ENTRY_DOCUMENT);
            std::fs::write(&path, shell::render_page(&content))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        Command::Snapshot {
            out,
            time,
            width,
            height,
        } => {
            let render_config = cli::render_config(width, height);
            let image = viewer::snapshot(SceneConfig::default(), &render_config, time)
                .context("Failed to render snapshot")?;
            image
                .save(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            log::info!("Wrote {}x{} frame at t={}s to {}", width, height, time, out.display());
        }
    }

    Ok(())
}

// The browser build starts from the library's wasm entry point
#[cfg(target_arch = "wasm32")]
fn main() {}
