use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::domain::image::{AspectRatio, ComplexityLevel, StyleConfig};
use crate::infrastructure::bootstrap::GOOGLE_PROVIDER;
use crate::infrastructure::csv::Delimiter;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a delimited outline file and print the pages
    Import(ImportArgs),

    /// Normalize an outline file to `No,Title,Content` CSV
    Export(ExportArgs),

    /// Change one field of one page and write the outline back out
    Edit(EditArgs),

    /// Plan an outline for a topic with the text model
    Outline(OutlineArgs),

    /// Generate one image per page of an outline file
    Generate(GenerateArgs),

    /// Generate variations of a single prompt
    Images(ImagesArgs),

    /// Store or remove the API key in the OS keyring
    #[command(subcommand)]
    ApiKey(ApiKeyCommand),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct InputArgs {
    /// Field delimiter of the input file: a character, `tab`, or `auto` (default: comma)
    #[arg(long)]
    pub delimiter: Option<Delimiter>,
}

#[derive(Subcommand, Debug)]
pub enum ApiKeyCommand {
    /// Save a key (overwrites any stored key)
    Set {
        key: String,

        #[arg(long, default_value = GOOGLE_PROVIDER)]
        provider: String,
    },

    /// Remove the stored key
    Delete {
        #[arg(long, default_value = GOOGLE_PROVIDER)]
        provider: String,
    },

    /// Report whether a key is stored, without printing it
    Status {
        #[arg(long, default_value = GOOGLE_PROVIDER)]
        provider: String,
    },
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Outline file (CSV, any line endings, UTF-8 or Shift_JIS)
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Single ASCII character used between output fields
    #[arg(long, default_value_t = ',')]
    pub output_delimiter: char,

    /// Write to this path instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// 1-based position of the page in the outline
    #[arg(long)]
    pub page: usize,

    /// title, content, visualCue, emphasis or mood
    #[arg(long)]
    pub field: String,

    #[arg(long)]
    pub value: String,

    /// Single ASCII character used between output fields
    #[arg(long, default_value_t = ',')]
    pub output_delimiter: char,

    /// Write to this path instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Presentation topic
    #[arg(long)]
    pub prompt: String,

    #[arg(long, default_value_t = 5)]
    pub pages: u32,

    #[arg(long, value_enum, default_value_t = ComplexityArg::Standard)]
    pub complexity: ComplexityArg,

    /// Save the outline as CSV
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    #[arg(long, default_value = "clean corporate presentation")]
    pub style: String,

    #[arg(long)]
    pub colors: Option<String>,

    #[arg(long, value_enum, default_value_t = AspectArg::Wide)]
    pub aspect: AspectArg,

    /// Ask for images without rendered text
    #[arg(long)]
    pub no_text: bool,
}

impl From<StyleArgs> for StyleConfig {
    fn from(args: StyleArgs) -> Self {
        StyleConfig {
            style: args.style,
            color_scheme: args.colors,
            aspect_ratio: args.aspect.into(),
            include_text: !args.no_text,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Upload the images to Drive after saving them
    #[arg(long)]
    pub upload: bool,

    /// Drive folder name (defaults to a timestamp)
    #[arg(long)]
    pub folder: Option<String>,
}

#[derive(Args, Debug)]
pub struct ImagesArgs {
    #[arg(long)]
    pub prompt: String,

    #[arg(long, default_value_t = 1)]
    pub count: u32,

    /// Image to edit or use as a visual reference
    #[arg(long)]
    pub reference: Option<PathBuf>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ComplexityArg {
    Simple,
    Standard,
    Detailed,
}

impl From<ComplexityArg> for ComplexityLevel {
    fn from(arg: ComplexityArg) -> Self {
        match arg {
            ComplexityArg::Simple => ComplexityLevel::Simple,
            ComplexityArg::Standard => ComplexityLevel::Standard,
            ComplexityArg::Detailed => ComplexityLevel::Detailed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AspectArg {
    /// 16:9
    Wide,
    /// 4:3
    Standard,
    /// 1:1
    Square,
}

impl From<AspectArg> for AspectRatio {
    fn from(arg: AspectArg) -> Self {
        match arg {
            AspectArg::Wide => AspectRatio::Wide,
            AspectArg::Standard => AspectRatio::Standard,
            AspectArg::Square => AspectRatio::Square,
        }
    }
}
