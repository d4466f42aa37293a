//! Rule table for valid architecture/variant/linking combinations.
//!
//! * `all` builds bundle GPL loaders, so they are never statically linked
//!   and do not exist for arm64.
//! * arm64 builds are static only.

use log::debug;

use super::{Architecture, Choice, Linking, Selection, Variant};

/// Applies a changed input to `selection` and returns the corrected result.
///
/// When architecture and variant conflict, the input that just changed wins:
/// picking arm64 moves the variant back to `web`, picking `all` moves the
/// architecture to `w64`.
pub fn apply(selection: &Selection, change: Choice) -> Selection {
    let mut next = selection.clone();

    match change {
        Choice::Architecture(architecture) => {
            next.architecture = architecture;
            if architecture == Architecture::Arm64 && next.variant == Variant::All {
                debug!("arm64 has no 'all' variant, switching to 'web'");
                next.variant = Variant::Web;
            }
        }
        Choice::Variant(variant) => {
            next.variant = variant;
            if variant == Variant::All && next.architecture == Architecture::Arm64 {
                debug!("'all' variant is not built for arm64, switching to w64");
                next.architecture = Architecture::W64;
            }
        }
        Choice::Linking(linking) => next.linking = linking,
    }

    enforce(next)
}

/// Brings an arbitrary selection in line with the rule table.
///
/// Without a change to arbitrate, architecture takes precedence over variant.
pub fn enforce(mut selection: Selection) -> Selection {
    if selection.architecture == Architecture::Arm64 && selection.variant == Variant::All {
        selection.variant = Variant::Web;
    }

    if selection.variant == Variant::All {
        if selection.linking.is_static() {
            debug!(
                "'{}' linking is unavailable for 'all', falling back to shared",
                selection.linking
            );
            selection.linking = Linking::Shared;
        }
    } else if selection.architecture == Architecture::Arm64 && selection.linking == Linking::Shared
    {
        debug!("arm64 has no shared build, falling back to static");
        selection.linking = Linking::Static;
    }

    selection
}

/// Whether `choice` is unavailable given the current selection.
pub fn is_disabled(selection: &Selection, choice: Choice) -> bool {
    if selection.variant == Variant::All {
        return matches!(
            choice,
            Choice::Linking(Linking::Static | Linking::StaticFfi)
                | Choice::Architecture(Architecture::Arm64)
        );
    }

    if selection.architecture == Architecture::Arm64 {
        return matches!(
            choice,
            Choice::Variant(Variant::All) | Choice::Linking(Linking::Shared)
        );
    }

    false
}

pub fn is_valid(selection: &Selection) -> bool {
    [
        Choice::Architecture(selection.architecture),
        Choice::Variant(selection.variant),
        Choice::Linking(selection.linking),
    ]
    .into_iter()
    .all(|choice| !is_disabled(selection, choice))
}
