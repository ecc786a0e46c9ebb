use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One page ("branch") of the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub label: String,
    /// Controls, sub-page links and decorations shown on this page, in order.
    pub items: Vec<String>,
    /// Pages with their own reset control reserve their values on entry and restore them on exit.
    #[serde(default)]
    pub resettable: bool,
}

impl Page {
    fn new(label: &str, items: &[&str], resettable: bool) -> Self {
        Self {
            label: label.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            resettable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub root: String,
    pub pages: IndexMap<String, Page>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl PanelLayout {
    /// The chord panel's page tree.
    pub fn standard() -> Self {
        let pages = [
            (
                "root",
                Page::new(
                    "Settings menu",
                    &[
                        "chartDivider",
                        "arrangePreview",
                        "scaleRatio",
                        "saveSettings",
                        "manageSettings",
                        "dataDivider",
                        "dataSettings",
                        "embedDivider",
                        "embedCode",
                    ],
                    false,
                ),
            ),
            (
                "dataSettings",
                Page::new(
                    "Data",
                    &[
                        "sourceDivider",
                        "wholeSheet",
                        "selectedRange",
                        "columnDivider",
                        "fromColumn",
                        "toColumn",
                        "weightColumn",
                        "filterDivider",
                        "applyFilters",
                        "resetButton_dataSettings",
                    ],
                    true,
                ),
            ),
            (
                "manageSettings",
                Page::new(
                    "Reset",
                    &[
                        "useInitial",
                        "useStandard",
                        "useUser",
                        "useDocument",
                        "applyButton",
                    ],
                    false,
                ),
            ),
            (
                "saveSettings",
                Page::new(
                    "Save",
                    &[
                        "makePermanent",
                        "makeDefault",
                        "clearPermanent",
                        "clearDefault",
                        "manageButton",
                    ],
                    false,
                ),
            ),
            (
                "embedCode",
                Page::new(
                    "Get",
                    &["svgLabel", "svgCode", "resetButton_embedCode"],
                    false,
                ),
            ),
            (
                "arrangePreview",
                Page::new(
                    "Appearance",
                    &[
                        "previewWidth",
                        "links",
                        "nodes",
                        "resetButton_arrangePreview",
                    ],
                    true,
                ),
            ),
            (
                "scaleRatio",
                Page::new(
                    "Scale",
                    &[
                        "scaleWidth",
                        "scaleFont",
                        "scaleMargin",
                        "scaleFill",
                        "scaleFillTransparent",
                        "resetButton_scaleRatio",
                    ],
                    true,
                ),
            ),
            (
                "links",
                Page::new(
                    "Links",
                    &[
                        "linkColorMode",
                        "linkFillColor",
                        "linkFillEndColor",
                        "linkOpacity",
                        "linkBorderWidth",
                        "resetButton_links",
                    ],
                    true,
                ),
            ),
            (
                "nodes",
                Page::new(
                    "Nodes",
                    &[
                        "nodePadding",
                        "nodeWidth",
                        "sortGroups",
                        "labelDivider",
                        "labelPadding",
                        "labelFontSize",
                        "labelFontColor",
                        "labelFontName",
                        "labelFontBold",
                        "labelFontItalic",
                        "resetButton_nodes",
                    ],
                    true,
                ),
            ),
        ];

        Self {
            root: "root".to_string(),
            pages: pages
                .into_iter()
                .map(|(name, page)| (name.to_string(), page))
                .collect(),
        }
    }

    pub fn page(&self, branch: &str) -> Option<&Page> {
        self.pages.get(branch)
    }

    /// The page that lists `item` directly.
    pub fn branch_of(&self, item: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|(_, page)| page.items.iter().any(|i| i == item))
            .map(|(name, _)| name.as_str())
    }
}
