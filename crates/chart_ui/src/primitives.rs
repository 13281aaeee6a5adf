//! DOM contract helpers shared by the chart primitives.

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_class_is_appended_to_base_class() {
        assert_eq!(merge_layout_class("ui-chart", None), "ui-chart");
        assert_eq!(merge_layout_class("ui-chart", Some("")), "ui-chart");
        assert_eq!(
            merge_layout_class("ui-chart", Some("h-64 w-full")),
            "ui-chart h-64 w-full"
        );
    }

    #[test]
    fn bool_tokens_are_stable() {
        assert_eq!(bool_token(true), "true");
        assert_eq!(bool_token(false), "false");
    }
}
