use bnb_market::marketplace::listings::{
    CatalogError, FilterCriteria, ListingCatalog, PropertyDetail, PropertyType, RawCriteria,
    TypeFilter,
};

const CATALOGUE: &str = "\
id,title,price,beds,agent,type
h1,Hostel bunk near Main Gate,45000,1,Campus Connect,shared
h2,Self-con with kitchenette,120000,1,Trusted Homes,self-contain
h3,Three bed duplex for groups,520000,3,Group Housing,apartment
h4,Single room off Eziobodo Road,70000,1,Fast Movers,single
";

fn catalogue() -> ListingCatalog {
    ListingCatalog::from_reader(CATALOGUE.as_bytes()).expect("catalogue parses")
}

#[test]
fn imported_catalogue_keeps_file_order() {
    let catalog = catalogue();
    let ids: Vec<_> = catalog
        .listings()
        .iter()
        .map(|listing| listing.id.as_str())
        .collect();

    assert_eq!(ids, vec!["h1", "h2", "h3", "h4"]);
    assert_eq!(catalog.listings()[1].property_type, PropertyType::SelfContain);
}

#[test]
fn search_bar_and_pickers_combine() {
    let catalog = catalogue();
    let raw = RawCriteria {
        q: Some("ROOM".to_string()),
        max_price: Some("100000".to_string()),
        min_beds: Some("1".to_string()),
        property_type: Some("single".to_string()),
    };

    let results = catalog.search(&FilterCriteria::from_raw(&raw));
    assert_eq!(results.count, 1);
    assert_eq!(results.matches[0].id.as_str(), "h4");
    assert_eq!(results.headline, "Showing 1 Matching Listings");
}

#[test]
fn cheapest_group_option_is_found_by_beds() {
    let catalog = catalogue();
    let criteria = FilterCriteria::default()
        .with_min_beds(3)
        .with_type(TypeFilter::only(PropertyType::Apartment));

    let results = catalog.search(&criteria);
    assert_eq!(results.count, 1);

    let detail = PropertyDetail::for_listing(&results.matches[0]);
    assert_eq!(detail.price_label, "₦520,000");
    assert_eq!(detail.beds_label, "3 Bedrooms");
}

#[test]
fn malformed_catalogues_are_rejected() {
    let duplicate = "id,title,price,beds,agent,type\n\
                     x1,One,1000,1,A,shared\n\
                     x1,Two,2000,1,B,shared\n";
    assert!(matches!(
        ListingCatalog::from_reader(duplicate.as_bytes()),
        Err(CatalogError::DuplicateId(id)) if id == "x1"
    ));

    let bedless = "id,title,price,beds,agent,type\ny1,Store room,1000,0,A,single\n";
    assert!(matches!(
        ListingCatalog::from_reader(bedless.as_bytes()),
        Err(CatalogError::NoBeds { .. })
    ));

    let villa = "id,title,price,beds,agent,type\nz1,Villa,1000,2,A,villa\n";
    assert!(matches!(
        ListingCatalog::from_reader(villa.as_bytes()),
        Err(CatalogError::UnknownPropertyType { value, .. }) if value == "villa"
    ));

    let priced_in_words = "id,title,price,beds,agent,type\nw1,Flat,cheap,2,A,apartment\n";
    assert!(matches!(
        ListingCatalog::from_reader(priced_in_words.as_bytes()),
        Err(CatalogError::Csv(_))
    ));
}
