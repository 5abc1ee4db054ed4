use anyhow::{Context, Result, bail};
use folio_config::Config;
use folio_engine::{ArticleRef, DirectoryArticles, RenderOptions, Wiki};
use folio_syntax::{parse_with, tokenize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Render an article from the articles directory to HTML.
    Render {
        article: ArticleRef,
        articles_dir: Option<PathBuf>,
    },
    /// Print the parsed tree of a file as JSON.
    Tree { file: PathBuf },
    /// Print the tokens of a file.
    Tokens { file: PathBuf },
}

fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} render <category/name> [articles-dir]\n  {program} tree <file>\n  {program} tokens <file>"
    )
}

fn parse_args(args: &[String]) -> Result<Command> {
    let args: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();

    match args.as_slice() {
        ["render", article] | ["render", article, _] => {
            let Some(parsed) = ArticleRef::parse(article) else {
                bail!("Invalid article reference '{article}'");
            };
            Ok(Command::Render {
                article: parsed,
                articles_dir: args.get(2).map(PathBuf::from),
            })
        }
        ["tree", file] => Ok(Command::Tree {
            file: PathBuf::from(file),
        }),
        ["tokens", file] => Ok(Command::Tokens {
            file: PathBuf::from(file),
        }),
        _ => bail!("Unrecognised arguments"),
    }
}

fn render(article: &ArticleRef, articles_dir: Option<PathBuf>) -> Result<()> {
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if articles_dir.is_some() => {
            log::warn!("Ignoring config file: {e}");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let (articles_path, from_config) = match (articles_dir, &config) {
        (Some(dir), _) => (dir, false),
        (None, Some(config)) => (config.articles_path.clone(), true),
        (None, None) => bail!(
            "No articles directory provided and no config file found at {}",
            config_path.display()
        ),
    };
    let options = config
        .as_ref()
        .map(Config::render_options)
        .unwrap_or_default();

    let articles = DirectoryArticles::open(&articles_path).with_context(|| {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        format!(
            "Articles path '{}'{source} is invalid",
            articles_path.display()
        )
    })?;

    let wiki = Wiki::with_options(articles, options);
    let start = Instant::now();
    let rendered = wiki.render_article(article)?;
    log::info!(
        "Rendering {article} took {:.3}s",
        start.elapsed().as_secs_f64()
    );

    for problem in &rendered.problems {
        log::warn!("{problem}");
    }
    println!("{}", rendered.html);

    // A failed lookup may succeed next time; report it through the exit code
    rendered.into_result()?;
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Info by default; `RUST_LOG` is applied on top.
fn logger() -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();
    builder
}

fn main() -> Result<()> {
    logger().init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("folio");

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(2);
        }
    };

    match command {
        Command::Render {
            article,
            articles_dir,
        } => render(&article, articles_dir)?,
        Command::Tree { file } => {
            let source = read_source(&file)?;
            let options = RenderOptions::default().parse_options();
            let document = parse_with(&source, options);
            println!("{}", document.to_json()?);
        }
        Command::Tokens { file } => {
            let source = read_source(&file)?;
            for token in tokenize(&source) {
                println!("{:?} {:?}", token.kind, token.text);
            }
        }
    }

    Ok(())
}
