#![allow(dead_code)]

use rentals::database::RentalsRepository;
use rentals::error::ErrorKind;
use rentals::models::{GeoPoint, GetRentalsParams, Rental, RentalRow, SortKey};

pub const COSTA_MESA: GeoPoint = GeoPoint {
    lat: 33.64,
    lng: -117.93,
};

pub const PORTLAND: GeoPoint = GeoPoint {
    lat: 45.52,
    lng: -122.68,
};

pub const USERS: [(i32, &str, &str); 3] = [(1, "John", "Smith"), (2, "Jane", "Doe"), (3, "Sam", "Lee")];

/// 25 rentals. Odd ids sit within a few miles of Costa Mesa, even ids in
/// Portland. Prices climb 2500 per id starting at 9000; years are scattered.
pub fn fixture_rows() -> Vec<RentalRow> {
    (1..=25).map(fixture_row).collect()
}

pub fn fixture_row(id: i32) -> RentalRow {
    let (user_id, first_name, last_name) = USERS[((id - 1) % 3) as usize];
    let odd = id % 2 == 1;

    RentalRow {
        id,
        user_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        name: format!("Rental {}", id),
        rental_type: if odd { "camper-van" } else { "trailer" }.to_string(),
        description: format!("Description of rental {}", id),
        sleeps: 2 + id % 4,
        price: 9000 + i64::from(id - 1) * 2500,
        city: if odd { "Costa Mesa" } else { "Portland" }.to_string(),
        state: if odd { "CA" } else { "OR" }.to_string(),
        zip: if odd { "92627" } else { "97201" }.to_string(),
        country: "US".to_string(),
        make: "Volkswagen".to_string(),
        model: "Bay Window".to_string(),
        year: 1970 + (id * 7) % 30,
        length: 15.0 + id as f32 * 0.5,
        lat: if odd { f64::from(3364 + id) / 100.0 } else { PORTLAND.lat },
        lng: if odd { COSTA_MESA.lng } else { PORTLAND.lng },
        primary_image_url: format!("https://images.example.com/rentals/{}.jpg", id),
    }
}

pub fn ids(rentals: &[Rental]) -> Vec<i32> {
    rentals.iter().map(|r| r.id).collect()
}

fn sorted(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids
}

/// Lookup behaviour every repository must share.
pub async fn check_repository(repo: &dyn RentalsRepository) {
    // single lookup matches the stored row
    let rental = repo.get_rental(7).await.unwrap();
    assert_eq!(rental, Rental::from(fixture_row(7)));
    assert_eq!(rental.price.day, 24000);
    assert_eq!(rental.user.first_name, "John");
    assert_eq!(rental.location.city, "Costa Mesa");

    // unknown id is NotFound and names the id
    let err = repo.get_rental(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("404"));

    // no filters returns everything
    let all = repo.get_rentals(&GetRentalsParams::default()).await.unwrap();
    assert_eq!(sorted(ids(&all)), (1..=25).collect::<Vec<_>>());

    // unknown ids give an empty list, not an error
    let none = repo
        .get_rentals(&GetRentalsParams {
            ids: vec![404, 500],
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());

    // inclusive price range
    let priced = repo
        .get_rentals(&GetRentalsParams {
            price_min: Some(11500),
            price_max: Some(19000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sorted(ids(&priced)), vec![2, 3, 4, 5]);

    let cheap = repo
        .get_rentals(&GetRentalsParams {
            price_min: Some(100),
            price_max: Some(200),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(cheap.is_empty());

    // near-point
    let near = repo
        .get_rentals(&GetRentalsParams {
            near: Some(COSTA_MESA),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sorted(ids(&near)), (1..=25).step_by(2).collect::<Vec<_>>());

    let nowhere = repo
        .get_rentals(&GetRentalsParams {
            near: Some(GeoPoint { lat: 0.0, lng: 0.0 }),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(nowhere.is_empty());

    // all filters at once, paginated by year
    let page = repo
        .get_rentals(&GetRentalsParams {
            ids: vec![1, 3, 7, 15, 23],
            price_min: Some(9000),
            price_max: Some(75000),
            near: Some(COSTA_MESA),
            sort: Some(SortKey::Year),
            offset: Some(2),
            limit: Some(3),
        })
        .await
        .unwrap();
    // years: 1 -> 1977, 23 -> 1981, 15 -> 1985, 7 -> 1989, 3 -> 1991
    assert_eq!(ids(&page), vec![15, 7, 3]);

    // sorted listing with limit only
    let by_price = repo
        .get_rentals(&GetRentalsParams {
            sort: Some(SortKey::Price),
            limit: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&by_price), vec![1, 2, 3, 4]);

    // single lookup and list lookup agree field for field
    let listed = repo
        .get_rentals(&GetRentalsParams {
            ids: vec![7],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed, vec![repo.get_rental(7).await.unwrap()]);
}
