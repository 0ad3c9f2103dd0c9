use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::controls::request::{DEFAULT_DIR_SYNC_ATTRIBUTE_COUNT, DEFAULT_PAGE_SIZE};
use crate::controls::{
    AsqRequest, DirSyncOptions, DirSyncRequest, MarkerKind, MarkerRequest, PageResultRequest,
    RequestControl, SortKey, SortRequest, VlvRequest,
};
use crate::ControlError;

#[derive(Parser, Debug)]
#[command(name = "ldapctl")]
#[command(about = "Encode LDAP request controls and decode response controls")]
#[command(version)]
pub struct CliArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level: debug, info, warn, error
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// How binary values are printed
    #[arg(short, long, value_enum, default_value = "hex", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a request control and print its value
    Encode {
        #[command(subcommand)]
        control: EncodeCommand,
    },
    /// Decode a YAML batch of response controls
    Decode {
        /// Path to the YAML batch file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum EncodeCommand {
    /// Simple paged results
    Page {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: i32,
        /// Cookie from the previous page, base64
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Server side sort
    Sort {
        /// Sort key as attr[:rule][:r], repeatable
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
    },
    /// Virtual list view
    Vlv {
        #[arg(long, default_value_t = 0)]
        before: i32,
        #[arg(long, default_value_t = 0)]
        after: i32,
        #[arg(long, default_value_t = 0)]
        offset: i32,
        #[arg(long, default_value_t = 0)]
        count: i32,
        /// Assertion value to position on, takes precedence over the offset
        #[arg(long)]
        target: Option<String>,
        /// Context ID returned by the server, base64
        #[arg(long)]
        context: Option<String>,
    },
    /// Directory synchronization
    Dirsync {
        /// Cookie from the previous round, base64
        #[arg(long)]
        cookie: Option<String>,
        #[arg(long, default_value_t = DEFAULT_DIR_SYNC_ATTRIBUTE_COUNT)]
        attribute_count: i32,
        #[arg(long)]
        object_security: bool,
        #[arg(long)]
        parents_first: bool,
        #[arg(long)]
        public_data_only: bool,
        #[arg(long)]
        incremental_values: bool,
    },
    /// Attribute scoped query
    Asq {
        #[arg(long)]
        attribute: String,
    },
    /// Control without a value
    Marker {
        #[arg(long, value_enum)]
        kind: MarkerArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Hex,
    Base64,
}

impl OutputFormat {
    pub fn render(self, bytes: &[u8]) -> String {
        match self {
            OutputFormat::Hex => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
            OutputFormat::Base64 => BASE64.encode(bytes),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerArg {
    DomainScope,
    LazyCommit,
    DirectoryNotification,
    PermissiveModify,
    ShowDeleted,
    TreeDelete,
}

impl From<MarkerArg> for MarkerKind {
    fn from(arg: MarkerArg) -> Self {
        match arg {
            MarkerArg::DomainScope => MarkerKind::DomainScope,
            MarkerArg::LazyCommit => MarkerKind::LazyCommit,
            MarkerArg::DirectoryNotification => MarkerKind::DirectoryNotification,
            MarkerArg::PermissiveModify => MarkerKind::PermissiveModify,
            MarkerArg::ShowDeleted => MarkerKind::ShowDeleted,
            MarkerArg::TreeDelete => MarkerKind::TreeDelete,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Encode(RequestControl),
    Decode(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: tracing::Level,
    pub output: OutputFormat,
    pub action: Action,
}

pub fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

fn config_error(err: ControlError) -> ControlError {
    match err {
        ControlError::Config(_) => err,
        other => ControlError::Config(other.to_string()),
    }
}

fn decode_base64(field: &str, value: Option<&str>) -> crate::Result<Option<Vec<u8>>> {
    value
        .map(|v| {
            BASE64
                .decode(v)
                .map_err(|e| ControlError::Config(format!("Invalid {}: {}", field, e)))
        })
        .transpose()
}

/// Parses `attr`, `attr:r`, `attr:rule` or `attr:rule:r`.
pub fn parse_sort_key(key: &str) -> crate::Result<SortKey> {
    let mut parts: Vec<&str> = key.split(':').collect();
    let reverse = parts.len() > 1 && parts.last() == Some(&"r");
    if reverse {
        parts.pop();
    }

    match parts.as_slice() {
        [name] => SortKey::new(*name, None, reverse),
        [name, rule] => SortKey::new(*name, Some(*rule), reverse),
        _ => Err(ControlError::Config(format!("Invalid sort key: {}", key))),
    }
    .map_err(config_error)
}

fn build_request(command: EncodeCommand) -> crate::Result<RequestControl> {
    let control: RequestControl = match command {
        EncodeCommand::Page { size, cookie } => {
            let mut page = PageResultRequest::with_page_size(size)?;
            page.set_cookie(decode_base64("cookie", cookie.as_deref())?.as_deref());
            page.into()
        }
        EncodeCommand::Sort { keys } => {
            let keys = keys
                .iter()
                .map(|k| parse_sort_key(k))
                .collect::<crate::Result<Vec<_>>>()?;
            SortRequest::new(keys).into()
        }
        EncodeCommand::Vlv {
            before,
            after,
            offset,
            count,
            target,
            context,
        } => {
            let mut vlv = VlvRequest::by_offset(before, after, offset)?;
            vlv.set_estimate_count(count)?;
            vlv.set_target(target.as_deref().map(str::as_bytes));
            vlv.set_context_id(decode_base64("context", context.as_deref())?.as_deref());
            vlv.into()
        }
        EncodeCommand::Dirsync {
            cookie,
            attribute_count,
            object_security,
            parents_first,
            public_data_only,
            incremental_values,
        } => {
            let mut options = DirSyncOptions::empty();
            options.set(DirSyncOptions::OBJECT_SECURITY, object_security);
            options.set(DirSyncOptions::PARENTS_FIRST, parents_first);
            options.set(DirSyncOptions::PUBLIC_DATA_ONLY, public_data_only);
            options.set(DirSyncOptions::INCREMENTAL_VALUES, incremental_values);

            let cookie = decode_base64("cookie", cookie.as_deref())?;
            DirSyncRequest::with_attribute_count(cookie.as_deref(), options, attribute_count)?
                .into()
        }
        EncodeCommand::Asq { attribute } => AsqRequest::new(attribute).into(),
        EncodeCommand::Marker { kind } => MarkerRequest::new(kind.into()).into(),
    };
    Ok(control)
}

impl Config {
    pub fn from_cli_args(args: CliArgs) -> crate::Result<Self> {
        let log_level = if args.verbose {
            tracing::Level::DEBUG
        } else {
            parse_log_level(&args.log_level)
        };

        let action = match args.command {
            Command::Encode { control } => {
                Action::Encode(build_request(control).map_err(config_error)?)
            }
            Command::Decode { file } => Action::Decode(file),
        };

        Ok(Config {
            log_level,
            output: args.output,
            action,
        })
    }
}
