use super::types::{ArgKind, ArgSpec, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_MODE: [ArgSpec; 1] = [ArgSpec {
    name: "mode",
    kind: ArgKind::String,
    required: true,
}];
const ARGS_KIND: [ArgSpec; 1] = [ArgSpec {
    name: "kind",
    kind: ArgKind::String,
    required: true,
}];
const ARGS_PAGE: [ArgSpec; 1] = [ArgSpec {
    name: "page",
    kind: ArgKind::I32,
    required: true,
}];
const ARGS_VALUE: [ArgSpec; 1] = [ArgSpec {
    name: "value",
    kind: ArgKind::F64,
    required: true,
}];
const ARGS_LINES: [ArgSpec; 1] = [ArgSpec {
    name: "lines",
    kind: ArgKind::I32,
    required: true,
}];
const ARGS_CONTENTS: [ArgSpec; 1] = [ArgSpec {
    name: "contents",
    kind: ArgKind::String,
    required: false,
}];
const ARGS_MOVE_READING_BAR: [ArgSpec; 2] = [
    ArgSpec {
        name: "page",
        kind: ArgKind::I32,
        required: true,
    },
    ArgSpec {
        name: "line",
        kind: ArgKind::I32,
        required: true,
    },
];
const ARGS_ZOOM_TO_RECT: [ArgSpec; 5] = [
    ArgSpec {
        name: "page",
        kind: ArgKind::I32,
        required: true,
    },
    ArgSpec {
        name: "x0",
        kind: ArgKind::F64,
        required: true,
    },
    ArgSpec {
        name: "y0",
        kind: ArgKind::F64,
        required: true,
    },
    ArgSpec {
        name: "x1",
        kind: ArgKind::F64,
        required: true,
    },
    ArgSpec {
        name: "y1",
        kind: ArgKind::F64,
        required: true,
    },
];

const COMMAND_SPECS: [CommandSpec; 35] = [
    CommandSpec {
        id: "tool-mode",
        title: "Set Tool Mode",
        args: &ARGS_MODE,
    },
    CommandSpec {
        id: "annotation-mode",
        title: "Set Annotation Type",
        args: &ARGS_KIND,
    },
    CommandSpec {
        id: "begin-temporary-mode",
        title: "Begin Temporary Tool",
        args: &ARGS_MODE,
    },
    CommandSpec {
        id: "end-temporary-mode",
        title: "End Temporary Tool",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "interaction-mode",
        title: "Set Interaction Mode",
        args: &ARGS_MODE,
    },
    CommandSpec {
        id: "next-page",
        title: "Next Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "prev-page",
        title: "Previous Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "first-page",
        title: "First Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "last-page",
        title: "Last Page",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "goto-page",
        title: "Go to Page",
        args: &ARGS_PAGE,
    },
    CommandSpec {
        id: "set-zoom",
        title: "Set Zoom",
        args: &ARGS_VALUE,
    },
    CommandSpec {
        id: "zoom-in",
        title: "Zoom In",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "zoom-out",
        title: "Zoom Out",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "zoom-to-rect",
        title: "Zoom to Rectangle",
        args: &ARGS_ZOOM_TO_RECT,
    },
    CommandSpec {
        id: "toggle-reading-bar",
        title: "Toggle Reading Bar",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "move-reading-bar",
        title: "Move Reading Bar",
        args: &ARGS_MOVE_READING_BAR,
    },
    CommandSpec {
        id: "reading-bar-next-line",
        title: "Reading Bar Next Line",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "reading-bar-prev-line",
        title: "Reading Bar Previous Line",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "reading-bar-lines",
        title: "Reading Bar Lines",
        args: &ARGS_LINES,
    },
    CommandSpec {
        id: "toggle-pacer",
        title: "Toggle Pacer",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "pacer-speed",
        title: "Set Pacer Speed",
        args: &ARGS_VALUE,
    },
    CommandSpec {
        id: "pacer-step",
        title: "Advance Pacer",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "rewind",
        title: "Rewind",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "fence-history",
        title: "Fence History",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "reset-history",
        title: "Reset History",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "edit-annotation",
        title: "Edit Annotation",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "end-editing",
        title: "End Editing",
        args: &ARGS_CONTENTS,
    },
    CommandSpec {
        id: "remove-annotation",
        title: "Remove Annotation",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "auto-size-annotation",
        title: "Auto Size Annotation",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "next-annotation",
        title: "Select Next Annotation",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "prev-annotation",
        title: "Select Previous Annotation",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "deselect-all",
        title: "Deselect All",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "toggle-hide-notes",
        title: "Toggle Hide Notes",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "cancel",
        title: "Cancel",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "quit",
        title: "Quit",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn find_command_spec(id: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{command_registry, find_command_spec};

    #[test]
    fn registry_ids_are_unique() {
        let ids: HashSet<&str> = command_registry().iter().map(|spec| spec.id).collect();
        assert_eq!(ids.len(), command_registry().len());
    }

    #[test]
    fn zoom_to_rect_takes_a_page_and_four_coordinates() {
        let spec = find_command_spec("zoom-to-rect").expect("zoom-to-rect is registered");
        assert_eq!(spec.args.len(), 5);
        assert!(spec.args.iter().all(|arg| arg.required));
        assert!(find_command_spec("open-palette").is_none());
    }
}
