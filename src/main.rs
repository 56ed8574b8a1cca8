use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::html_writer::{DEFAULT_SCENE_PKG, HtmlWriter};
use folio::io::FormatRegistry;
use folio::server;

/// Generate and serve an animated personal portfolio page.
#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site content file (.yaml, .yml, .json) - used when no subcommand specified
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(short, long, global = true, default_value = "output")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the site (default behavior)
    Generate {
        /// Directory with the compiled scene bundle (wasm-pack output)
        #[arg(long, default_value = DEFAULT_SCENE_PKG)]
        scene_pkg: PathBuf,

        /// Generate the page without the scene bundle
        #[arg(long)]
        no_scene: bool,
    },
    /// Start development server with hot reload
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory with the compiled scene bundle (wasm-pack output)
        #[arg(long, default_value = DEFAULT_SCENE_PKG)]
        scene_pkg: PathBuf,
    },
    /// Render the component style guide and serve it (dev only)
    #[cfg(feature = "dev")]
    Styleguide {
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

fn generate(input: Option<&Path>, output: &Path, writer: HtmlWriter) -> anyhow::Result<()> {
    if input.is_none() {
        tracing::info!("no input specified, generating the built-in default site");
    }
    let registry = FormatRegistry::with_html_writer(writer);
    folio::build(&registry, input, output)?;
    Ok(())
}

#[cfg(feature = "dev")]
fn write_styleguide(output: &Path) -> anyhow::Result<()> {
    use folio::components::ComponentRenderer;
    use folio::html_writer::STYLESHEET;
    use folio::site::SiteContent;

    std::fs::create_dir_all(output)?;
    let html = ComponentRenderer::styleguide(&SiteContent::default())?;
    std::fs::write(output.join("index.html"), html)?;
    std::fs::write(output.join("style.css"), STYLESHEET)?;
    tracing::info!("wrote style guide to {}", output.display());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let input = cli.input.as_deref();

    match cli.command {
        Some(Commands::Generate {
            scene_pkg,
            no_scene,
        }) => {
            let writer = HtmlWriter::with_scene_pkg((!no_scene).then_some(scene_pkg));
            generate(input, &cli.output, writer)?;
        }
        Some(Commands::Serve { port, scene_pkg }) => {
            let writer = HtmlWriter::with_scene_pkg(Some(scene_pkg));
            server::serve(input, &cli.output, port, writer).await?;
        }
        #[cfg(feature = "dev")]
        Some(Commands::Styleguide { port }) => {
            write_styleguide(&cli.output)?;
            server::serve_static(&cli.output, port).await?;
        }
        None => {
            generate(input, &cli.output, HtmlWriter::new())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_with_defaults() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("output"));
        assert!(cli.input.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_generate_subcommand() {
        let cli = Cli::try_parse_from([
            "folio",
            "generate",
            "--input",
            "site.yaml",
            "--output",
            "public",
            "--scene-pkg",
            "dist/pkg",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("site.yaml")));
        assert_eq!(cli.output, PathBuf::from("public"));
        match cli.command {
            Some(Commands::Generate {
                scene_pkg,
                no_scene,
            }) => {
                assert_eq!(scene_pkg, PathBuf::from("dist/pkg"));
                assert!(!no_scene);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn cli_generate_defaults_scene_pkg() {
        let cli = Cli::try_parse_from(["folio", "generate", "--no-scene"]).unwrap();
        match cli.command {
            Some(Commands::Generate {
                scene_pkg,
                no_scene,
            }) => {
                assert_eq!(scene_pkg, PathBuf::from(DEFAULT_SCENE_PKG));
                assert!(no_scene);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_serve_subcommand() {
        let cli = Cli::try_parse_from(["folio", "serve", "-i", "site.json", "--port", "8080"])
            .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("site.json")));
        match cli.command {
            Some(Commands::Serve { port, .. }) => assert_eq!(port, 8080),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn cli_global_args_before_subcommand() {
        let cli = Cli::try_parse_from(["folio", "-o", "site", "serve"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("site"));
        match cli.command {
            Some(Commands::Serve { port, .. }) => assert_eq!(port, 3000),
            _ => panic!("Expected Serve command"),
        }
    }
}
