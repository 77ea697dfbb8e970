/// Target descriptors: the YouTube regions this extension can hide

/// Stable symbolic name of a hideable region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    ClarifyBox,
    Suggestions,
    EndScreen,
    Comments,
    DonationShelf,
    MainScreenContents,
}

impl TargetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetId::ClarifyBox => "CLARIFY_BOX",
            TargetId::Suggestions => "SUGGESTIONS",
            TargetId::EndScreen => "END_SCREEN",
            TargetId::Comments => "COMMENTS",
            TargetId::DonationShelf => "DONATION_SHELF",
            TargetId::MainScreenContents => "MAIN_SCREEN_CONTENTS",
        }
    }

    /// Label shown next to the checkbox on the options page
    pub fn label(&self) -> &'static str {
        match self {
            TargetId::ClarifyBox => "Hide clarify box",
            TargetId::Suggestions => "Hide suggestions",
            TargetId::EndScreen => "Hide end screen",
            TargetId::Comments => "Hide comments",
            TargetId::DonationShelf => "Hide donation shelf",
            TargetId::MainScreenContents => "Hide main page contents",
        }
    }
}

/// One hideable UI region and whether the user wants it hidden
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDescriptor {
    pub id: TargetId,
    pub option_name: &'static str,
    pub selector: &'static str,
    pub desired_hidden: bool,
}

impl TargetDescriptor {
    pub const fn new(
        id: TargetId,
        option_name: &'static str,
        selector: &'static str,
    ) -> TargetDescriptor {
        TargetDescriptor {
            id,
            option_name,
            selector,
            desired_hidden: false,
        }
    }
}

static DESCRIPTORS: [TargetDescriptor; 6] = [
    TargetDescriptor::new(TargetId::ClarifyBox, "hideClarifyBox", "#clarify-box"),
    TargetDescriptor::new(TargetId::Suggestions, "hideSuggestions", "#secondary"),
    TargetDescriptor::new(TargetId::EndScreen, "hideEndScreen", ".ytp-endscreen-content"),
    TargetDescriptor::new(TargetId::Comments, "hideComments", "#comments"),
    TargetDescriptor::new(TargetId::DonationShelf, "hideDonation", "#donation-shelf"),
    TargetDescriptor::new(TargetId::MainScreenContents, "hideMainContents", "#contents"),
];

/// Fresh descriptor list, nothing marked for hiding yet
pub fn default_descriptors() -> Vec<TargetDescriptor> {
    DESCRIPTORS.to_vec()
}

/// The static descriptor table
pub fn descriptor_table() -> &'static [TargetDescriptor] {
    &DESCRIPTORS
}

/// Every persisted preference key, in descriptor order
pub fn option_names() -> Vec<&'static str> {
    DESCRIPTORS.iter().map(|d| d.option_name).collect()
}

/// Built-in value used when the user never stored a preference
pub fn default_value(_option_name: &str) -> bool {
    false
}
