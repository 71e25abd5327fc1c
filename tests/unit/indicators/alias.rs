//! Unit tests for the alias resolver

use macrobias::indicators::alias::AliasResolver;
use macrobias::models::series::SeriesId;
use std::collections::BTreeMap;

#[test]
fn default_table_covers_every_known_series() {
    let resolver = AliasResolver::new();
    assert!(resolver.validate().is_ok());
    assert_eq!(resolver.known_series().len(), SeriesId::KNOWN.len());
}

#[test]
fn resolves_internal_keys_and_canonical_codes() {
    let resolver = AliasResolver::new();
    assert_eq!(resolver.resolve("core_cpi_yoy"), SeriesId::CoreCpi);
    assert_eq!(resolver.resolve("CORE_CPI_YOY"), SeriesId::CoreCpi);
    assert_eq!(resolver.resolve("CPILFESL"), SeriesId::CoreCpi);
    assert_eq!(resolver.resolve("payems"), SeriesId::Payrolls);
}

#[test]
fn unknown_keys_are_kept_as_other() {
    let resolver = AliasResolver::new();
    assert_eq!(
        resolver.resolve("housing_starts"),
        SeriesId::Other("housing_starts".to_string())
    );
}

#[test]
fn maps_back_to_primary_internal_key() {
    let resolver = AliasResolver::new();
    assert_eq!(resolver.internal_key(&SeriesId::Payrolls), "payrolls");
    assert_eq!(resolver.internal_key(&SeriesId::InitialClaims), "claims_4w");

    let other = SeriesId::Other("XYZ".to_string());
    assert_eq!(resolver.internal_key(&other), "XYZ");
}

#[test]
fn configured_aliases_extend_the_table() {
    let mut extra = BTreeMap::new();
    extra.insert("nfp".to_string(), "PAYEMS".to_string());
    extra.insert("bogus".to_string(), "NOT_A_SERIES".to_string());

    let resolver = AliasResolver::with_extra(&extra);
    assert_eq!(resolver.resolve("nfp"), SeriesId::Payrolls);
    assert_eq!(resolver.internal_key(&SeriesId::Payrolls), "payrolls");
    assert_eq!(resolver.aliases_of(&SeriesId::Payrolls), vec!["nfp", "payrolls"]);
    assert_eq!(
        resolver.resolve("bogus"),
        SeriesId::Other("bogus".to_string())
    );
}
