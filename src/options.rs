use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factory::DecimalPrecision;

/// Limits applied to alias replay to harden against alias bombs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasLimits {
    /// Maximum total number of **replayed** events injected from aliases across the entire parse.
    /// When exceeded, loading errors (alias replay limit exceeded).
    pub max_total_replayed_events: usize,
    /// Maximum depth of the alias replay stack (nested alias → injected buffer → alias, etc.).
    pub max_replay_stack_depth: usize,
    /// Maximum number of times a **single anchor id** may be expanded via alias.
    /// Use `usize::MAX` for "unlimited".
    pub max_alias_expansions_per_anchor: usize,
}

impl Default for AliasLimits {
    fn default() -> Self {
        Self {
            max_total_replayed_events: 1_000_000,
            max_replay_stack_depth: 64,
            max_alias_expansions_per_anchor: usize::MAX,
        }
    }
}

/// Options controlling how YAML text becomes nodes.
///
/// ```rust
/// use yaml_nodes::DecimalPrecision;
///
/// let options = yaml_nodes::loader_options! {
///     precision: DecimalPrecision::BigDecimal,
///     strict_booleans: true,
/// };
/// let node = yaml_nodes::load_with_options("[1.5, yes]", options).unwrap();
/// assert!(node.path_index(0).is_big_decimal());
/// assert!(node.path_index(1).is_text());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Precision policy for every decimal built while loading. Default: `Double`.
    pub precision: DecimalPrecision,
    /// Limits for alias replay to harden against alias bombs.
    pub alias_limits: AliasLimits,
    /// Enable legacy octal parsing where values starting with `00` are treated as base-8.
    /// They are deprecated in YAML 1.2. Default: false.
    pub legacy_octal_numbers: bool,
    /// If true, interpret only the literals `true` and `false` (any case) as booleans.
    /// YAML 1.1 forms like `yes`/`no`/`on`/`off` stay text.
    /// Default: false (accept YAML 1.1 boolean forms).
    pub strict_booleans: bool,
    /// Maximum number of bytes read from a reader input. `None` reads to the end.
    pub max_reader_bytes: Option<usize>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            precision: DecimalPrecision::Double,
            alias_limits: AliasLimits::default(),
            legacy_octal_numbers: false,
            strict_booleans: false,
            max_reader_bytes: None,
        }
    }
}

/// Line break written between output lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineBreak {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Unix => "\n",
            LineBreak::Windows => "\r\n",
            LineBreak::Mac => "\r",
        }
    }
}

/// Layout chosen for containers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStyle {
    /// Flow (`[a, b]`, `{k: v}`) for containers whose children are all plain
    /// scalars, block otherwise.
    #[default]
    Auto,
    /// Always flow.
    Flow,
    /// Always block.
    Block,
}

/// Options controlling how nodes become YAML text.
///
/// ```rust
/// use yaml_nodes::{FlowStyle, SeqNode};
///
/// let seq: SeqNode = [1, 2, 3].into_iter().collect();
/// let options = yaml_nodes::dumper_options! {
///     default_flow_style: FlowStyle::Block,
/// };
/// let yaml = yaml_nodes::dump_with_options(&seq.into(), options).unwrap();
/// assert_eq!(yaml, "- 1\n- 2\n- 3\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumperOptions {
    /// Spaces per nesting level. Must be at least 1. Default: 2.
    pub indent_step: usize,
    /// Maximum width of a `!!binary` base64 line; longer payloads continue
    /// on following lines. 0 disables wrapping. Default: 80.
    pub line_width: usize,
    /// Line break between output lines. Default: `Unix`.
    pub line_break: LineBreak,
    /// Container layout. Default: `Auto`.
    pub default_flow_style: FlowStyle,
    /// Write `---` before every document, not only between documents.
    pub explicit_start: bool,
}

impl Default for DumperOptions {
    fn default() -> Self {
        Self {
            indent_step: 2,
            line_width: 80,
            line_break: LineBreak::Unix,
            default_flow_style: FlowStyle::Auto,
            explicit_start: false,
        }
    }
}

impl DumperOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.indent_step == 0 {
            return Err(Error::invalid_argument("indent_step must be at least 1"));
        }
        Ok(())
    }
}
