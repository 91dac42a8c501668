//! Tailwind utility conflict resolution: later classes override earlier
//! classes of the same utility group.

use regex::{Regex, RegexSet};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::class_value::{cx, ClassValue};
use crate::errors::{Result, StyledError};

/// Trait for resolving conflicts between Tailwind utility classes.
///
/// Implementors classify a utility (the class without variants or the
/// important marker) into a group. The shared `resolve` logic keeps, for every
/// group under the same variant prefix, only the last class of that group.
/// Classes without a group are always kept.
pub trait ConflictResolver {
    /// Group of a bare utility such as `p-4` or `text-lg`
    fn group_of(&self, utility: &str) -> Option<&str>;

    /// Groups that a class of `group` overrides when it appears later
    fn overridden_by(&self, group: &str) -> &[String];

    /// Remove classes overridden by later classes of the same group.
    ///
    /// Survivors keep their relative order and are joined with single spaces.
    fn resolve(&self, class_list: &str) -> String {
        let classes: Vec<&str> = class_list.split_whitespace().collect();
        let mut keep = vec![false; classes.len()];
        let mut taken: HashSet<String> = HashSet::new();

        for (index, class) in classes.iter().enumerate().rev() {
            let parsed = ParsedClass::parse(class);
            let Some(group) = self.group_of(parsed.utility) else {
                keep[index] = true;
                continue;
            };

            let scope = parsed.scope();
            let id = format!("{}{}", scope, group);
            if taken.contains(&id) {
                continue;
            }

            keep[index] = true;
            taken.insert(id);
            for overridden in self.overridden_by(group) {
                taken.insert(format!("{}{}", scope, overridden));
            }
        }

        classes
            .iter()
            .zip(keep)
            .filter(|(_, kept)| *kept)
            .map(|(class, _)| *class)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A class split into its variant prefix, important marker and bare utility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClass<'a> {
    pub variants: Vec<&'a str>,
    pub important: bool,
    pub utility: &'a str,
}

impl<'a> ParsedClass<'a> {
    /// Split `md:hover:!-mt-2` into variants `[md, hover]`, important and `mt-2`.
    ///
    /// Colons inside arbitrary values (`bg-[url(a:b)]`) are not separators.
    pub fn parse(class: &'a str) -> Self {
        let mut variants = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in class.char_indices() {
            match c {
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => {
                    variants.push(&class[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }

        let mut utility = &class[start..];
        let mut important = false;
        if let Some(rest) = utility.strip_prefix('!') {
            utility = rest;
            important = true;
        }
        if let Some(rest) = utility.strip_suffix('!') {
            utility = rest;
            important = true;
        }
        // Negative values share the group of their positive form
        if let Some(rest) = utility.strip_prefix('-') {
            if !rest.is_empty() {
                utility = rest;
            }
        }

        Self {
            variants,
            important,
            utility,
        }
    }

    /// Conflict scope: sorted variants plus the important marker
    fn scope(&self) -> String {
        let mut variants = self.variants.clone();
        variants.sort_unstable();
        let mut scope = variants.join(":");
        scope.push(':');
        if self.important {
            scope.push('!');
        }
        scope
    }
}

/// Regex-based utility group table.
///
/// Groups are matched in order, the first matching pattern wins. Groups
/// added through configuration are checked before the built-in table.
#[derive(Debug, Clone)]
pub struct UtilityGroups {
    names: Vec<String>,
    patterns: Vec<String>,
    set: RegexSet,
    conflicts: HashMap<String, Vec<String>>,
}

const BUILTIN_GROUPS: &[(&str, &str)] = &[
    ("display", r"block|inline-block|inline|flex|inline-flex|table|inline-table|table-cell|table-row|flow-root|grid|inline-grid|contents|list-item|hidden"),
    ("position", r"static|fixed|absolute|relative|sticky"),
    ("visibility", r"visible|invisible|collapse"),
    ("px", r"px-.+"),
    ("py", r"py-.+"),
    ("ps", r"ps-.+"),
    ("pe", r"pe-.+"),
    ("pt", r"pt-.+"),
    ("pr", r"pr-.+"),
    ("pb", r"pb-.+"),
    ("pl", r"pl-.+"),
    ("p", r"p-.+"),
    ("mx", r"mx-.+"),
    ("my", r"my-.+"),
    ("ms", r"ms-.+"),
    ("me", r"me-.+"),
    ("mt", r"mt-.+"),
    ("mr", r"mr-.+"),
    ("mb", r"mb-.+"),
    ("ml", r"ml-.+"),
    ("m", r"m-.+"),
    ("space-x", r"space-x-.+"),
    ("space-y", r"space-y-.+"),
    ("gap-x", r"gap-x-.+"),
    ("gap-y", r"gap-y-.+"),
    ("gap", r"gap-.+"),
    ("size", r"size-.+"),
    ("min-w", r"min-w-.+"),
    ("max-w", r"max-w-.+"),
    ("w", r"w-.+"),
    ("min-h", r"min-h-.+"),
    ("max-h", r"max-h-.+"),
    ("h", r"h-.+"),
    ("inset-x", r"inset-x-.+"),
    ("inset-y", r"inset-y-.+"),
    ("inset", r"inset-.+"),
    ("top", r"top-.+"),
    ("right", r"right-.+"),
    ("bottom", r"bottom-.+"),
    ("left", r"left-.+"),
    ("start", r"start-.+"),
    ("end", r"end-.+"),
    ("z", r"z-.+"),
    ("flex-direction", r"flex-(row|row-reverse|col|col-reverse)"),
    ("flex-wrap", r"flex-(wrap|wrap-reverse|nowrap)"),
    ("flex", r"flex-(1|auto|initial|none|\[.+\])"),
    ("grow", r"grow(-.+)?"),
    ("shrink", r"shrink(-.+)?"),
    ("basis", r"basis-.+"),
    ("grid-cols", r"grid-cols-.+"),
    ("grid-rows", r"grid-rows-.+"),
    ("col-span", r"col-(span-.+|auto)"),
    ("row-span", r"row-(span-.+|auto)"),
    ("justify-items", r"justify-items-.+"),
    ("justify-self", r"justify-self-.+"),
    ("justify-content", r"justify-(normal|start|end|center|between|around|evenly|stretch)"),
    ("align-items", r"items-.+"),
    ("align-content", r"content-(normal|center|start|end|between|around|evenly|baseline|stretch)"),
    ("align-self", r"self-.+"),
    ("font-size", r"text-(xs|sm|base|lg|xl|[2-9]xl)"),
    ("text-align", r"text-(left|center|right|justify|start|end)"),
    ("text-wrap", r"text-(wrap|nowrap|balance|pretty)"),
    ("text-overflow", r"truncate|text-(ellipsis|clip)"),
    ("text-color", r"text-.+"),
    ("font-weight", r"font-(thin|extralight|light|normal|medium|semibold|bold|extrabold|black)"),
    ("font-family", r"font-.+"),
    ("font-style", r"italic|not-italic"),
    ("text-transform", r"uppercase|lowercase|capitalize|normal-case"),
    ("text-decoration", r"underline|overline|line-through|no-underline"),
    ("leading", r"leading-.+"),
    ("tracking", r"tracking-.+"),
    ("whitespace", r"whitespace-.+"),
    ("bg-attachment", r"bg-(fixed|local|scroll)"),
    ("bg-size", r"bg-(auto|cover|contain)"),
    ("bg-position", r"bg-(bottom|center|left|left-bottom|left-top|right|right-bottom|right-top|top)"),
    ("bg-repeat", r"bg-(repeat|no-repeat|repeat-x|repeat-y|repeat-round|repeat-space)"),
    ("bg-image", r"bg-(none|gradient-to-.+|linear-.+)"),
    ("bg-color", r"bg-.+"),
    ("rounded-tl", r"rounded-tl(-.+)?"),
    ("rounded-tr", r"rounded-tr(-.+)?"),
    ("rounded-br", r"rounded-br(-.+)?"),
    ("rounded-bl", r"rounded-bl(-.+)?"),
    ("rounded-t", r"rounded-t(-.+)?"),
    ("rounded-r", r"rounded-r(-.+)?"),
    ("rounded-b", r"rounded-b(-.+)?"),
    ("rounded-l", r"rounded-l(-.+)?"),
    ("rounded-s", r"rounded-s(-.+)?"),
    ("rounded-e", r"rounded-e(-.+)?"),
    ("rounded", r"rounded(-(none|xs|sm|md|lg|xl|2xl|3xl|full|\[.+\]))?"),
    ("border-w-x", r"border-x(-(0|2|4|8|\[.+\]))?"),
    ("border-w-y", r"border-y(-(0|2|4|8|\[.+\]))?"),
    ("border-w-t", r"border-t(-(0|2|4|8|\[.+\]))?"),
    ("border-w-r", r"border-r(-(0|2|4|8|\[.+\]))?"),
    ("border-w-b", r"border-b(-(0|2|4|8|\[.+\]))?"),
    ("border-w-l", r"border-l(-(0|2|4|8|\[.+\]))?"),
    ("border-w", r"border(-(0|2|4|8|\[\d.*\]))?"),
    ("border-style", r"border-(solid|dashed|dotted|double|hidden|none)"),
    ("border-color", r"border-.+"),
    ("ring-w", r"ring(-(0|1|2|4|8|\[\d.*\]))?"),
    ("ring-inset", r"ring-inset"),
    ("ring-offset-w", r"ring-offset-(0|1|2|4|8|\[\d.*\])"),
    ("ring-offset-color", r"ring-offset-.+"),
    ("ring-color", r"ring-.+"),
    ("shadow", r"shadow(-(2xs|xs|sm|md|lg|xl|2xl|inner|none|\[.+\]))?"),
    ("shadow-color", r"shadow-.+"),
    ("opacity", r"opacity-.+"),
    ("overflow-x", r"overflow-x-.+"),
    ("overflow-y", r"overflow-y-.+"),
    ("overflow", r"overflow-(auto|hidden|clip|visible|scroll)"),
    ("object-fit", r"object-(contain|cover|fill|none|scale-down)"),
    ("aspect", r"aspect-.+"),
    ("cursor", r"cursor-.+"),
    ("pointer-events", r"pointer-events-.+"),
    ("select", r"select-.+"),
    ("transition", r"transition(-(none|all|colors|opacity|shadow|transform))?"),
    ("duration", r"duration-.+"),
    ("ease", r"ease-.+"),
    ("delay", r"delay-.+"),
];

const BUILTIN_CONFLICTS: &[(&str, &[&str])] = &[
    ("p", &["px", "py", "ps", "pe", "pt", "pr", "pb", "pl"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "ms", "me", "mt", "mr", "mb", "ml"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("gap", &["gap-x", "gap-y"]),
    ("size", &["w", "h"]),
    ("inset", &["inset-x", "inset-y", "top", "right", "bottom", "left", "start", "end"]),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    ("font-size", &["leading"]),
    ("rounded", &[
        "rounded-t", "rounded-r", "rounded-b", "rounded-l", "rounded-s", "rounded-e",
        "rounded-tl", "rounded-tr", "rounded-br", "rounded-bl",
    ]),
    ("rounded-t", &["rounded-tl", "rounded-tr"]),
    ("rounded-r", &["rounded-tr", "rounded-br"]),
    ("rounded-b", &["rounded-br", "rounded-bl"]),
    ("rounded-l", &["rounded-tl", "rounded-bl"]),
    ("border-w", &[
        "border-w-x", "border-w-y", "border-w-t", "border-w-r", "border-w-b", "border-w-l",
    ]),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
    ("overflow", &["overflow-x", "overflow-y"]),
];

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}

impl UtilityGroups {
    /// The built-in Tailwind group table
    pub fn tailwind() -> Self {
        let names = BUILTIN_GROUPS.iter().map(|(name, _)| name.to_string()).collect();
        let patterns = BUILTIN_GROUPS.iter().map(|(_, p)| anchored(p)).collect::<Vec<_>>();
        let set = RegexSet::new(&patterns).expect("built-in utility patterns are valid");
        let conflicts = BUILTIN_CONFLICTS
            .iter()
            .map(|(group, overridden)| {
                (group.to_string(), overridden.iter().map(|g| g.to_string()).collect())
            })
            .collect();

        Self {
            names,
            patterns,
            set,
            conflicts,
        }
    }

    /// Add a group checked before every existing group
    pub fn with_group(mut self, name: &str, patterns: &[String]) -> Result<Self> {
        for pattern in patterns.iter().rev() {
            let anchored = anchored(pattern);
            Regex::new(&anchored).map_err(|source| StyledError::InvalidPattern {
                group: name.to_string(),
                source,
            })?;
            self.names.insert(0, name.to_string());
            self.patterns.insert(0, anchored);
        }
        self.set = RegexSet::new(&self.patterns).map_err(|source| StyledError::InvalidPattern {
            group: name.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// Declare that a later class of `group` removes earlier classes of `overridden`
    pub fn with_conflicts(mut self, group: &str, overridden: &[String]) -> Self {
        let entry = self.conflicts.entry(group.to_string()).or_default();
        for other in overridden {
            if !entry.contains(other) {
                entry.push(other.clone());
            }
        }
        self
    }

    pub fn group_count(&self) -> usize {
        let unique: HashSet<&String> = self.names.iter().collect();
        unique.len()
    }
}

impl Default for UtilityGroups {
    fn default() -> Self {
        Self::tailwind()
    }
}

impl ConflictResolver for UtilityGroups {
    fn group_of(&self, utility: &str) -> Option<&str> {
        self.set
            .matches(utility)
            .iter()
            .next()
            .map(|index| self.names[index].as_str())
    }

    fn overridden_by(&self, group: &str) -> &[String] {
        self.conflicts.get(group).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn builtin_groups() -> &'static UtilityGroups {
    static BUILTIN: OnceLock<UtilityGroups> = OnceLock::new();
    BUILTIN.get_or_init(UtilityGroups::tailwind)
}

/// Compose class inputs like [`cx`], then drop classes overridden by later
/// classes of the same utility group.
pub fn tw_merge(inputs: &[ClassValue]) -> String {
    builtin_groups().resolve(&cx(inputs))
}

/// Merge with a custom resolver
pub fn merge_with(resolver: &dyn ConflictResolver, inputs: &[ClassValue]) -> String {
    resolver.resolve(&cx(inputs))
}
