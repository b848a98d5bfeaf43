//! Built-in output schemas for listing detail pages and search summaries.

use std::sync::LazyLock;

use super::FieldMapping;

/// Detail-page record: output field → path into `propertyData`.
pub const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("available", "status.published"),
    ("archived", "status.archived"),
    ("phone", "contactInfo.telephoneNumbers.localNumber"),
    ("bedrooms", "bedrooms"),
    ("bathrooms", "bathrooms"),
    ("type", "transactionType"),
    ("property_type", "propertySubType"),
    ("tags", "tags"),
    ("description", "text.description"),
    ("title", "text.pageTitle"),
    ("subtitle", "text.propertyPhrase"),
    ("price", "prices.primaryPrice"),
    ("price_sqft", "prices.pricePerSqFt"),
    ("address", "address"),
    ("latitude", "location.latitude"),
    ("longitude", "location.longitude"),
    ("features", "keyFeatures"),
    ("history", "listingHistory"),
    ("photos", "images[*].{url: url, caption: caption}"),
    ("floorplans", "floorplans[*].{url: url, caption: caption}"),
    (
        "agency",
        "customer.{
            id: branchId,
            branch: branchName,
            company: companyName,
            address: displayAddress,
            commercial: commercial,
            buildToRent: buildToRent,
            isNew: isNewHomeDeveloper
        }",
    ),
    ("industry_affiliations", "industryAffiliations[*].name"),
    ("nearest_airports", "nearestAirports[*].{name: name, distance: distance}"),
    ("nearest_stations", "nearestStations[*].{name: name, distance: distance}"),
    ("sizings", "sizings[*].{unit: unit, min: minimumSize, max: maximumSize}"),
    ("brochures", "brochures"),
];

/// Search-summary record: output field → path into one `properties[]` entry.
pub const SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("id", "id"),
    ("bedrooms", "bedrooms"),
    ("bathrooms", "bathrooms"),
    ("number_of_images", "numberOfImages"),
    ("display_address", "displayAddress"),
    ("latitude", "location.latitude"),
    ("longitude", "location.longitude"),
    ("property_sub_type", "propertySubType"),
    ("listing_update_reason", "listingUpdate.listingUpdateReason"),
    ("listing_update_date", "listingUpdate.listingUpdateDate"),
    ("price_amount", "price.amount"),
    ("price_frequency", "price.frequency"),
    ("premium_listing", "premiumListing"),
    ("featured_property", "featuredProperty"),
    ("transaction_type", "transactionType"),
    ("students", "students"),
    ("display_size", "displaySize"),
    ("property_url", "propertyUrl"),
    ("first_visible_date", "firstVisibleDate"),
    ("added_or_reduced", "addedOrReduced"),
    ("property_type_full_description", "propertyTypeFullDescription"),
];

static DETAIL_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::compile(DETAIL_FIELDS).expect("valid detail field table"));

static SUMMARY_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::compile(SUMMARY_FIELDS).expect("valid summary field table"));

/// Compiled [`DETAIL_FIELDS`].
#[must_use]
pub fn detail_mapping() -> &'static FieldMapping {
    &DETAIL_MAPPING
}

/// Compiled [`SUMMARY_FIELDS`].
#[must_use]
pub fn summary_mapping() -> &'static FieldMapping {
    &SUMMARY_MAPPING
}
