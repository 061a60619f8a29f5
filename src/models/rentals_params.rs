use serde::Deserialize;
use std::str::FromStr;

use crate::error::RentalsError;

#[derive(Debug, Deserialize, Default)]
pub struct RentalsQuery {
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub ids: Option<String>, // comma separated
    pub near: Option<String>, // "lat,lng"
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Type,
    Make,
    Model,
    Year,
    Length,
    Sleeps,
    Price,
    City,
    State,
    Zip,
    Country,
    Lat,
    Lng,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Type => "type",
            SortKey::Make => "make",
            SortKey::Model => "model",
            SortKey::Year => "year",
            SortKey::Length => "length",
            SortKey::Sleeps => "sleeps",
            SortKey::Price => "price",
            SortKey::City => "city",
            SortKey::State => "state",
            SortKey::Zip => "zip",
            SortKey::Country => "country",
            SortKey::Lat => "lat",
            SortKey::Lng => "lng",
        }
    }
}

impl FromStr for SortKey {
    type Err = RentalsError;

    // Wire names plus the storage column names older clients sent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "type" => SortKey::Type,
            "make" | "vehicle_make" => SortKey::Make,
            "model" | "vehicle_model" => SortKey::Model,
            "year" | "vehicle_year" => SortKey::Year,
            "length" | "vehicle_length" => SortKey::Length,
            "sleeps" => SortKey::Sleeps,
            "price" | "price_per_day" => SortKey::Price,
            "city" | "home_city" => SortKey::City,
            "state" | "home_state" => SortKey::State,
            "zip" | "home_zip" => SortKey::Zip,
            "country" | "home_country" => SortKey::Country,
            "lat" => SortKey::Lat,
            "lng" => SortKey::Lng,
            _ => {
                return Err(RentalsError::InvalidInput(format!(
                    "unsupported sort field '{}'",
                    s.trim()
                )))
            }
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetRentalsParams {
    pub ids: Vec<i32>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub near: Option<GeoPoint>,
    pub sort: Option<SortKey>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TryFrom<RentalsQuery> for GetRentalsParams {
    type Error = RentalsError;

    fn try_from(query: RentalsQuery) -> Result<Self, Self::Error> {
        let sort = match non_blank(query.sort.as_deref()) {
            Some(raw) => Some(raw.parse::<SortKey>()?),
            None => None,
        };

        Ok(GetRentalsParams {
            ids: parse_ids(query.ids.as_deref())?,
            price_min: parse_int("price_min", query.price_min.as_deref())?,
            price_max: parse_int("price_max", query.price_max.as_deref())?,
            near: parse_near(query.near.as_deref())?,
            sort,
            limit: parse_int("limit", query.limit.as_deref())?,
            offset: parse_int("offset", query.offset.as_deref())?,
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, RentalsError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    raw.parse::<i64>().map(Some).map_err(|_| {
        RentalsError::InvalidInput(format!("{} must be an integer, got '{}'", name, raw))
    })
}

fn parse_ids(raw: Option<&str>) -> Result<Vec<i32>, RentalsError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(Vec::new());
    };

    let mut ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map_err(|_| {
                RentalsError::InvalidInput(format!("ids must be integers, got '{}'", s))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

fn parse_near(raw: Option<&str>) -> Result<Option<GeoPoint>, RentalsError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };

    let invalid = || RentalsError::InvalidInput(format!("near must be 'lat,lng', got '{}'", raw));

    let coords = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let &[lat, lng] = coords.as_slice() else {
        return Err(invalid());
    };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(RentalsError::InvalidInput(format!(
            "near coordinates out of range: {},{}",
            lat, lng
        )));
    }

    Ok(Some(GeoPoint { lat, lng }))
}
