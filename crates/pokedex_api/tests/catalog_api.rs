use chrono::NaiveDate;
use pokedex_api::{ApiConfig, CatalogApi};
use pokedex_core::{CategoryDto, CountryDto, OwnerDto, PokemonDto, ReviewDto, ReviewerDto};
use tempfile::TempDir;

struct Fixture {
    api: CatalogApi,
    _dir: TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let config = ApiConfig::with_db_path(dir.path().join("catalog.sqlite3"));
    let api = CatalogApi::new(config).expect("api should build without logging");
    Fixture { api, _dir: dir }
}

fn country(name: &str) -> Option<CountryDto> {
    Some(CountryDto {
        id: 0,
        name: name.to_string(),
    })
}

fn owner(first_name: &str, last_name: &str) -> Option<OwnerDto> {
    Some(OwnerDto {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

fn pokemon(name: &str) -> Option<PokemonDto> {
    Some(PokemonDto {
        id: 0,
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1996, 2, 27).expect("valid date"),
    })
}

fn review(title: &str, rating: i32) -> Option<ReviewDto> {
    Some(ReviewDto {
        id: 0,
        title: title.to_string(),
        text: "text".to_string(),
        rating,
    })
}

/// Seeds Canada, Ash Ketchum, Electric and Pikachu; returns their ids.
fn seed(api: &CatalogApi) -> (i64, i64, i64, i64) {
    let canada = api.create_country(country("Canada")).body.expect("country body").id;
    let ash = api
        .create_owner(canada, owner("Ash", "Ketchum"))
        .body
        .expect("owner body")
        .id;
    let electric = api
        .create_category(Some(CategoryDto {
            id: 0,
            name: "Electric".to_string(),
        }))
        .body
        .expect("category body")
        .id;
    let pikachu = api
        .create_pokemon(ash, electric, pokemon("Pikachu"))
        .body
        .expect("pokemon body")
        .id;
    (canada, ash, electric, pikachu)
}

#[test]
fn create_and_read_return_signal_contract_statuses() {
    let fx = fixture();

    let created = fx.api.create_country(country("Canada"));
    assert_eq!(created.status, 200);
    assert_eq!(created.message.as_deref(), Some("Successfully created"));
    let canada = created.body.expect("created country should be returned");
    assert!(canada.id > 0);

    let fetched = fx.api.get_country(canada.id);
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body, Some(canada));

    let listed = fx.api.list_countries();
    assert_eq!(listed.status, 200);
    assert_eq!(listed.body.map(|items| items.len()), Some(1));
}

#[test]
fn duplicate_natural_key_is_unprocessable() {
    let fx = fixture();
    assert_eq!(fx.api.create_country(country("Canada")).status, 200);

    let duplicate = fx.api.create_country(country(" canada "));
    assert_eq!(duplicate.status, 422);
    assert_eq!(duplicate.message.as_deref(), Some("Country already exists"));
    assert!(duplicate.body.is_none());
}

#[test]
fn missing_payload_and_mismatched_id_are_caller_errors() {
    let fx = fixture();
    let canada = fx
        .api
        .create_country(country("Canada"))
        .body
        .expect("country body");

    assert_eq!(fx.api.create_country(None).status, 400);
    assert_eq!(fx.api.update_country(canada.id, None).status, 400);

    let mismatched = fx.api.update_country(
        canada.id,
        Some(CountryDto {
            id: canada.id + 1,
            name: "Kanto".to_string(),
        }),
    );
    assert_eq!(mismatched.status, 400);
    assert_eq!(fx.api.get_country(canada.id).body, Some(canada));
}

#[test]
fn unknown_ids_are_not_found() {
    let fx = fixture();
    assert_eq!(fx.api.get_pokemon(404).status, 404);
    assert_eq!(fx.api.delete_reviewer(404).status, 404);
    assert_eq!(fx.api.pokemon_rating(404).status, 404);
    assert_eq!(fx.api.owners_of_country(404).status, 404);
    assert_eq!(
        fx.api
            .update_category(
                404,
                Some(CategoryDto {
                    id: 404,
                    name: "Ghost".to_string(),
                }),
            )
            .status,
        404
    );
}

#[test]
fn referenced_ids_must_exist_on_create() {
    let fx = fixture();
    let (canada, ash, electric, pikachu) = seed(&fx.api);

    assert_eq!(fx.api.create_owner(canada + 100, owner("Gary", "Oak")).status, 404);
    assert_eq!(
        fx.api
            .create_pokemon(ash + 100, electric, pokemon("Raichu"))
            .status,
        404
    );
    assert_eq!(
        fx.api
            .create_review(pikachu, 999, review("Nice", 4))
            .status,
        404
    );
}

#[test]
fn update_reports_success_and_keeps_relationships() {
    let fx = fixture();
    let (canada, ash, _, _) = seed(&fx.api);

    let updated = fx.api.update_owner(
        ash,
        Some(OwnerDto {
            id: ash,
            first_name: "Satoshi".to_string(),
            last_name: "Ketchum".to_string(),
        }),
    );
    assert_eq!(updated.status, 200);
    assert_eq!(updated.message.as_deref(), Some("Successfully updated"));
    assert_eq!(updated.body, Some(true));

    let home = fx.api.country_of_owner(ash).body.expect("owner country");
    assert_eq!(home.id, canada);
    let owner = fx.api.get_owner(ash).body.expect("owner body");
    assert_eq!(owner.first_name, "Satoshi");
}

#[test]
fn relationship_reads_follow_join_rows() {
    let fx = fixture();
    let (canada, ash, electric, pikachu) = seed(&fx.api);

    let residents = fx.api.owners_of_country(canada).body.expect("owners");
    assert!(residents.iter().any(|owner| owner.id == ash));

    let owned = fx.api.pokemon_of_owner(ash).body.expect("pokemon");
    assert_eq!(owned.iter().map(|p| p.id).collect::<Vec<_>>(), vec![pikachu]);

    let filed = fx.api.pokemon_by_category(electric).body.expect("pokemon");
    assert_eq!(filed.len(), 1);

    let owners = fx.api.owners_of_pokemon(pikachu).body.expect("owners");
    assert_eq!(owners.iter().map(|o| o.id).collect::<Vec<_>>(), vec![ash]);
}

#[test]
fn rating_averages_reviews() {
    let fx = fixture();
    let (_, _, _, pikachu) = seed(&fx.api);
    assert_eq!(fx.api.pokemon_rating(pikachu).body, Some(0.0));

    let brock = fx
        .api
        .create_reviewer(Some(ReviewerDto {
            id: 0,
            first_name: "Brock".to_string(),
            last_name: "Harrison".to_string(),
        }))
        .body
        .expect("reviewer body")
        .id;
    assert_eq!(fx.api.create_review(pikachu, brock, review("Great", 5)).status, 200);
    assert_eq!(fx.api.create_review(pikachu, brock, review("Fine", 2)).status, 200);

    assert_eq!(fx.api.pokemon_rating(pikachu).body, Some(3.5));
    assert_eq!(
        fx.api.reviews_by_reviewer(brock).body.map(|items| items.len()),
        Some(2)
    );
}

#[test]
fn deleting_pokemon_removes_its_reviews() {
    let fx = fixture();
    let (_, ash, _, pikachu) = seed(&fx.api);
    let misty = fx
        .api
        .create_reviewer(Some(ReviewerDto {
            id: 0,
            first_name: "Misty".to_string(),
            last_name: "Waterflower".to_string(),
        }))
        .body
        .expect("reviewer body")
        .id;
    let great = fx
        .api
        .create_review(pikachu, misty, review("Great", 5))
        .body
        .expect("review body")
        .id;

    let deleted = fx.api.delete_pokemon(pikachu);
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_none());

    assert_eq!(fx.api.get_pokemon(pikachu).status, 404);
    assert_eq!(fx.api.get_review(great).status, 404);
    assert_eq!(fx.api.pokemon_of_owner(ash).body, Some(Vec::new()));
}

#[test]
fn deleting_referenced_country_is_a_store_failure() {
    let fx = fixture();
    let (canada, _, _, _) = seed(&fx.api);

    let response = fx.api.delete_country(canada);
    assert_eq!(response.status, 500);
    assert!(response.message.is_some());
    assert!(fx.api.get_country(canada).is_success());
}

#[test]
fn responses_serialize_with_external_field_names() {
    let fx = fixture();
    let (_, ash, _, _) = seed(&fx.api);

    let json = serde_json::to_value(fx.api.get_owner(ash)).expect("response should serialize");
    assert_eq!(json["status"], 200);
    assert_eq!(json["body"]["firstName"], "Ash");
    assert_eq!(json["body"]["lastName"], "Ketchum");
    assert!(json.get("message").is_none());
}
