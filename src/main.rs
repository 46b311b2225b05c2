use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rekordbox_explorer::export::{render_tracks, write_tracks, ExportFormat};
use rekordbox_explorer::model::{Database, Playlist, Track};
use rekordbox_explorer::search::{filter_tracks, SearchScope};
use rekordbox_explorer::{ExplorerConfig, LibraryLoader, View};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Tracks,
    Playlists,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scope {
    /// Title, artist and album
    Basic,
    /// Also genre and key
    Extended,
}

#[derive(Parser, Debug)]
#[command(name = "rekordbox-explorer")]
#[command(about = "Browse and export a Rekordbox USB library", long_about = None)]
struct Args {
    /// export.pdb file, or the root of a mounted USB stick
    source: String,

    /// What to print
    #[arg(short = 'f', long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Write csv/json output to this file instead of stdout (csv/json formats only)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Only list tracks matching this fuzzy query
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Fields searched by --search
    #[arg(long, value_enum)]
    scope: Option<Scope>,

    /// Only list tracks of this playlist or folder
    #[arg(short = 'p', long)]
    playlist: Option<String>,

    /// Ignore exportExt.pdb
    #[arg(long)]
    no_ext: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<ExplorerConfig> {
        if self.output.is_some()
            && !matches!(self.format, OutputFormat::Csv | OutputFormat::Json)
        {
            bail!("--output needs --format csv or --format json");
        }

        let source = shellexpand::tilde(&self.source);
        let mut config = ExplorerConfig::new(PathBuf::from(source.as_ref()));

        config = match self.format {
            OutputFormat::Summary => config.with_view(View::Summary),
            OutputFormat::Tracks => config.with_view(View::Tracks),
            OutputFormat::Playlists => config.with_view(View::Playlists),
            OutputFormat::Csv => config.with_export(ExportFormat::Csv, self.output),
            OutputFormat::Json => config.with_export(ExportFormat::Json, self.output),
        };
        if self.no_ext {
            config = config.without_ext();
        }
        if let Some(query) = self.search {
            config = config.with_search(query);
        }
        if let Some(scope) = self.scope {
            config = config.with_search_scope(match scope {
                Scope::Basic => SearchScope::Basic,
                Scope::Extended => SearchScope::Extended,
            });
        }
        if let Some(name) = self.playlist {
            config = config.with_playlist(name);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = args.into_config()?;
    let loaded = LibraryLoader::new(&config)
        .load()
        .with_context(|| format!("Failed to load library from {:?}", config.source))?;
    let database = &loaded.database;

    let selected = select_tracks(database, &config)?;

    if let Some((format, output)) = &config.export {
        let tracks: Vec<Track> = selected.into_iter().cloned().collect();
        match output {
            Some(path) => write_tracks(path, &tracks, *format)
                .with_context(|| format!("Failed to export to {:?}", path))?,
            None => println!("{}", render_tracks(&tracks, *format)?),
        }
        return Ok(());
    }

    match config.view {
        View::Summary => print_summary(database, &loaded),
        View::Tracks => print_tracks(database, &config, &selected),
        View::Playlists => print_playlists(database),
    }

    Ok(())
}

/// Tracks after the playlist and search filters
fn select_tracks<'a>(database: &'a Database, config: &ExplorerConfig) -> Result<Vec<&'a Track>> {
    let mut tracks: Vec<&Track> = match &config.playlist {
        Some(name) => {
            let playlist = database
                .find_playlist_by_name(name)
                .with_context(|| format!("No playlist named {:?}", name))?;
            if playlist.is_folder {
                database
                    .sections_under_folder(playlist)
                    .into_iter()
                    .flat_map(|section| section.tracks)
                    .collect()
            } else {
                database.tracks_for_playlist(playlist)
            }
        }
        None => database.tracks().iter().collect(),
    };

    if let Some(query) = &config.search {
        let matching: Vec<u32> = filter_tracks(database.tracks(), query, config.search_scope)
            .into_iter()
            .map(|track| track.id)
            .collect();
        tracks.retain(|track| matching.binary_search(&track.id).is_ok());
    }

    Ok(tracks)
}

fn print_summary(database: &Database, loaded: &rekordbox_explorer::LoadedLibrary) {
    println!("Database:  {}", loaded.export_pdb.display());
    if let Some(ext) = &loaded.export_ext_pdb {
        println!("Extension: {}", ext.display());
    }
    println!("Tracks:    {}", database.track_count());
    println!("Playlists: {}", database.playlist_count());
}

fn print_tracks(database: &Database, config: &ExplorerConfig, selected: &[&Track]) {
    // A folder is listed section by section
    if let Some(folder) = config
        .playlist
        .as_deref()
        .and_then(|name| database.find_playlist_by_name(name))
        .filter(|playlist| playlist.is_folder)
    {
        for section in database.sections_under_folder(folder) {
            let tracks: Vec<&Track> = section
                .tracks
                .into_iter()
                .filter(|track| selected.iter().any(|s| s.id == track.id))
                .collect();
            if tracks.is_empty() {
                continue;
            }
            println!("== {} ({})", section.title, tracks.len());
            for track in tracks {
                print_track(track);
            }
        }
        return;
    }

    for track in selected {
        print_track(track);
    }
}

fn print_track(track: &Track) {
    println!(
        "{:>6}  {} - {}  [{}] {:.2} BPM",
        track.id,
        track.artist,
        track.title,
        track.duration_display(),
        track.bpm
    );
}

fn print_playlists(database: &Database) {
    for root in database.playlists() {
        root.walk(&mut |node: &Playlist, depth| {
            let marker = if node.is_folder { "+" } else { "-" };
            println!(
                "{}{} {} ({})",
                "  ".repeat(depth),
                marker,
                node.name,
                node.total_track_count()
            );
        });
    }
}
