//! Draft record - the in-progress wizard aggregate
//!
//! The draft holds binary assets in memory until the submission pipeline
//! uploads them. Nothing here touches the backend.

use bytes::Bytes;

/// Dishes offered by the dishes form
pub const MAX_DISHES: usize = 6;
/// Dishes required before the dishes step is valid
pub const MIN_DISHES: usize = 3;
/// Photos accepted by the photos form
pub const MAX_PHOTOS: usize = 10;
/// Photos required before the photos step is valid
pub const MIN_PHOTOS: usize = 3;

/// A file selected by the restaurant owner, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    /// Original file name, used for the extension of generated keys
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl BinaryAsset {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Extension taken after the last dot; the whole name when there is no dot
    pub fn extension(&self) -> &str {
        self.file_name.rsplit('.').next().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessInfo {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct About {
    pub founded_year: String,
    pub story: String,
    pub owner_quote: String,
    pub about_image: Option<BinaryAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub image: Option<BinaryAsset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryHours {
    pub delivery_areas: String,
    pub instructions: String,
    pub hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Social {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
    pub comments: String,
}

/// The aggregate collected by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub business_info: BusinessInfo,
    pub about: About,
    pub popular_dishes: Vec<DishDraft>,
    pub menu_pdf: Option<BinaryAsset>,
    pub delivery_hours: DeliveryHours,
    pub photos: Vec<BinaryAsset>,
    pub social: Social,
}

/// One top-level draft section, replaced as a whole by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    BusinessInfo(BusinessInfo),
    About(About),
    PopularDishes(Vec<DishDraft>),
    MenuPdf(Option<BinaryAsset>),
    DeliveryHours(DeliveryHours),
    Photos(Vec<BinaryAsset>),
    Social(Social),
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::BusinessInfo(_) => "business_info",
            Section::About(_) => "about",
            Section::PopularDishes(_) => "popular_dishes",
            Section::MenuPdf(_) => "menu_pdf",
            Section::DeliveryHours(_) => "delivery_hours",
            Section::Photos(_) => "photos",
            Section::Social(_) => "social",
        }
    }
}

impl Draft {
    /// Replace one section wholesale. No field-level merge happens here.
    pub fn replace(&mut self, section: Section) {
        match section {
            Section::BusinessInfo(v) => self.business_info = v,
            Section::About(v) => self.about = v,
            Section::PopularDishes(v) => self.popular_dishes = v,
            Section::MenuPdf(v) => self.menu_pdf = v,
            Section::DeliveryHours(v) => self.delivery_hours = v,
            Section::Photos(v) => self.photos = v,
            Section::Social(v) => self.social = v,
        }
    }

    /// Append an empty dish. Returns false once the form cap is reached.
    pub fn add_dish(&mut self) -> bool {
        if self.popular_dishes.len() >= MAX_DISHES {
            return false;
        }
        self.popular_dishes.push(DishDraft::default());
        true
    }

    /// Remove a dish. Dropping below the validation floor is allowed.
    pub fn remove_dish(&mut self, index: usize) -> Option<DishDraft> {
        (index < self.popular_dishes.len()).then(|| self.popular_dishes.remove(index))
    }

    /// Set or clear a dish image; false if the index is out of range
    pub fn set_dish_image(&mut self, index: usize, image: Option<BinaryAsset>) -> bool {
        match self.popular_dishes.get_mut(index) {
            Some(dish) => {
                dish.image = image;
                true
            }
            None => false,
        }
    }

    /// Append photos, keeping only the first `MAX_PHOTOS` overall
    pub fn add_photos(&mut self, photos: impl IntoIterator<Item = BinaryAsset>) {
        self.photos.extend(photos);
        self.photos.truncate(MAX_PHOTOS);
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<BinaryAsset> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    /// Number of binary assets the pipeline will upload
    pub fn pending_uploads(&self) -> usize {
        usize::from(self.about.about_image.is_some())
            + usize::from(self.menu_pdf.is_some())
            + self.photos.len()
            + self
                .popular_dishes
                .iter()
                .filter(|d| d.image.is_some())
                .count()
    }
}
