use chrono::NaiveDate;
use pokedex_core::{OwnerDto, Pokemon, PokemonDto, Review, ReviewDto};
use serde_json::json;

#[test]
fn pokemon_dto_uses_camel_case_and_iso_dates() {
    let dto = PokemonDto::from(Pokemon {
        id: 25,
        name: "Pikachu".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1996, 2, 27).unwrap(),
    });

    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(
        value,
        json!({"id": 25, "name": "Pikachu", "birthDate": "1996-02-27"})
    );
}

#[test]
fn payload_without_id_defaults_to_unsaved() {
    let dto: OwnerDto =
        serde_json::from_value(json!({"firstName": "Ash", "lastName": "Ketchum"})).unwrap();
    assert_eq!(dto.id, 0);

    let owner = dto.into_owner(7);
    assert_eq!(owner.country_id, 7);
    assert_eq!(owner.first_name, "Ash");
}

#[test]
fn review_projection_drops_owning_references() {
    let review = Review {
        id: 3,
        title: "Great".to_string(),
        text: "Fast and loyal".to_string(),
        rating: 5,
        pokemon_id: 25,
        reviewer_id: 9,
    };

    let value = serde_json::to_value(ReviewDto::from(review)).unwrap();
    assert_eq!(
        value,
        json!({"id": 3, "title": "Great", "text": "Fast and loyal", "rating": 5})
    );

    let payload: ReviewDto = serde_json::from_value(value).unwrap();
    let attached = payload.into_review(26, 10);
    assert_eq!((attached.pokemon_id, attached.reviewer_id), (26, 10));
}

#[test]
fn malformed_birth_date_is_rejected() {
    let result = serde_json::from_value::<PokemonDto>(
        json!({"name": "Pikachu", "birthDate": "27/02/1996"}),
    );
    assert!(result.is_err());
}
