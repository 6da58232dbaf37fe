use clap::{Parser, Subcommand};
use smallpress::{config, generate, init, output, serve};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "smallpress")]
#[command(about = "Static site generator for markdown blogs and small sites")]
#[command(long_about = "\
Static site generator for markdown blogs and small sites

Markdown in, HTML out. A site is a directory with a config file, markdown
content, and minijinja templates; `build` mirrors content/ into the output
directory.

Site structure:

  mysite/
  ├── smallpress.toml            # Optional config (defaults apply without it)
  ├── content/
  │   ├── index.md               # Section index → rendered with section.html
  │   ├── about.md               # Leaf page → rendered with single.html
  │   └── blog/
  │       ├── index.md           # Section index of /blog
  │       └── hello-world.md
  ├── templates/
  │   ├── _layouts/              # base.html plus head/header/footer includes
  │   ├── section.html           # For content/index.md
  │   ├── single.html            # For other content/*.md files
  │   └── blog/                  # section.html + single.html for blog pages
  └── static/                    # Copied verbatim into the output

Pages open with front matter between `+++` markers: JSON key-value pairs
(\"Title\": \"Hello\") that templates read. In templates, children(url, mode)
lists a section's entries and sorted(pages, key, descending) orders them;
`Date` values sort as day-month-year dates.

Run 'smallpress gen-config' to print a documented smallpress.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root (holds smallpress.toml, content/ and templates/)
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Output directory; a relative path lands under the site root
    #[arg(long, default_value = "website", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate front matter and templates without writing anything
    Check,
    /// Build, then serve the output over local HTTP
    Serve,
    /// Scaffold a new site with a working starter theme
    Init {
        /// Directory to create; scaffolds into the site root when omitted
        name: Option<String>,
    },
    /// Print a stock smallpress.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site, _) = load_site(&cli)?;
            run_build(&site)?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.site.display());
            let (site, _) = load_site(&cli)?;
            let report = generate::check(&site)?;
            output::print_check_report(&report);
            println!("==> Site is valid");
        }
        Command::Serve => {
            let (site, config) = load_site(&cli)?;
            run_build(&site)?;
            let addr = serve::local_addr(config.serve.port);
            println!("==> Serving {} at http://{}", site.output_dir.display(), addr);
            serve::serve(&site.output_dir, config.serve.port)?;
        }
        Command::Init { name } => {
            let root = match &name {
                Some(dir) => cli.site.join(dir),
                None => cli.site.clone(),
            };
            init::init_site(&root)?;
            println!("==> New site in {}", root.display());
            println!("Next: `smallpress build`, then `smallpress serve`.");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config and resolve the directory layout for this run.
fn load_site(cli: &Cli) -> Result<(generate::Site, config::SiteConfig), config::ConfigError> {
    let config = config::load_config(&cli.site)?;
    let site = generate::Site::from_config(&cli.site, &cli.output, &config);
    Ok((site, config))
}

/// Render the site with a printer thread draining the progress channel.
fn run_build(site: &generate::Site) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Building {}", site.content_dir.display());

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_build_event(&event);
        }
    });

    // The channel closes when `generate` drops its sender, so join before
    // propagating to get every progress line out ahead of the error.
    let result = generate::generate(site, Some(tx));
    printer.join().unwrap();
    let summary = result?;

    output::print_build_summary(&summary);
    println!("==> Build complete: {}", site.output_dir.display());
    Ok(())
}
