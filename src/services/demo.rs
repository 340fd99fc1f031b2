use crate::models::{AnimalRecord, Address, AgeValue, Attributes, Compatibility, Environment, Photo, Shelter};
use chrono::{Duration, Utc};
use rand::Rng;

struct ShelterInfo {
    id: &'static str,
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    address1: &'static str,
    city: &'static str,
    postcode: &'static str,
}

const SHELTERS: [ShelterInfo; 5] = [
    ShelterInfo {
        id: "atlanta-humane",
        name: "Atlanta Humane Society",
        phone: "(404) 974-2880",
        email: "info@atlantahumane.org",
        address1: "981 Howell Mill Road NW",
        city: "Atlanta",
        postcode: "30318",
    },
    ShelterInfo {
        id: "lifeline-dekalb",
        name: "LifeLine Animal Project - DeKalb",
        phone: "(404) 292-8800",
        email: "info@lifelineanimal.org",
        address1: "3180 Presidential Drive",
        city: "Atlanta",
        postcode: "30340",
    },
    ShelterInfo {
        id: "fulton-county",
        name: "Fulton County Animal Services",
        phone: "(404) 613-0357",
        email: "animal.services@fultoncountyga.gov",
        address1: "860 Marietta Blvd NW",
        city: "Atlanta",
        postcode: "30318",
    },
    ShelterInfo {
        id: "pawsatl",
        name: "PAWS Atlanta",
        phone: "(770) 593-1155",
        email: "info@pawsatlanta.org",
        address1: "5287 Covington Highway",
        city: "Decatur",
        postcode: "30035",
    },
    ShelterInfo {
        id: "angels-among-us",
        name: "Angels Among Us Pet Rescue",
        phone: "(770) 693-2537",
        email: "info@angelsrescue.org",
        address1: "P.O. Box 821",
        city: "Alpharetta",
        postcode: "30009",
    },
];

const BREEDS: [&str; 27] = [
    "Labrador Retriever", "German Shepherd", "Golden Retriever", "Bulldog", "Beagle",
    "Poodle", "Rottweiler", "Yorkshire Terrier", "Boxer", "Dachshund",
    "Siberian Husky", "Great Dane", "Doberman Pinscher", "Australian Shepherd",
    "Miniature Schnauzer", "Pembroke Welsh Corgi", "Cavalier King Charles Spaniel",
    "Shih Tzu", "Boston Terrier", "Pomeranian", "Havanese", "Shetland Sheepdog",
    "Brittany", "Cocker Spaniel", "Border Collie", "Pit Bull Terrier", "Mixed Breed",
];

const NAMES: [&str; 48] = [
    "Max", "Bella", "Charlie", "Luna", "Cooper", "Daisy", "Rocky", "Sadie",
    "Buddy", "Molly", "Tucker", "Lola", "Bear", "Sophie", "Duke", "Chloe",
    "Zeus", "Maggie", "Bentley", "Penny", "Oliver", "Zoe", "Leo", "Lily",
    "Milo", "Ruby", "Jack", "Roxy", "Toby", "Stella", "Winston", "Nala",
    "Finn", "Pepper", "Jasper", "Willow", "Gus", "Rosie", "Teddy", "Coco",
    "Murphy", "Gracie", "Archie", "Ellie", "Oscar", "Abby", "Henry", "Lucy",
];

const COLORS: [&str; 18] = [
    "Black", "Brown", "White", "Golden", "Yellow", "Tan", "Gray", "Red",
    "Black/Tan", "Black/White", "Brown/White", "Tri-color", "Brindle",
    "Cream", "Blue", "Chocolate", "Apricot", "Merle",
];

const TEMPERAMENTS: [&str; 17] = [
    "Friendly", "Playful", "Energetic", "Gentle", "Calm", "Affectionate",
    "Loyal", "Smart", "Protective", "Independent", "Social", "Curious",
    "Obedient", "Active", "Loving", "Patient", "Alert",
];

const DESCRIPTIONS: [&str; 10] = [
    "is a wonderful companion looking for their forever home. They love people and are always ready for adventure or cuddle time.",
    "is a sweet and loving dog who would do best in a home with a fenced yard. They enjoy walks and playtime.",
    "came to us as a stray and has proven to be an absolute delight. They're house-trained and get along well with other pets.",
    "is looking for an active family who can keep up with their energy. They would excel in a home with outdoor space.",
    "is a gentle soul who just wants to be loved. They're great with children and would make an excellent family pet.",
    "has overcome a difficult past and is ready for a fresh start. They're incredibly loyal and affectionate once they trust you.",
    "is a smart cookie who knows basic commands and is eager to learn more. They would thrive with positive reinforcement training.",
    "loves nothing more than being by your side. Whether it's a walk in the park or relaxing on the couch, they're happy as long as they're with you.",
    "is a playful pup with lots of energy. They would do best with an experienced owner who can provide structure and exercise.",
    "is looking for a quiet home where they can be the only pet. They prefer a calm environment and lots of love.",
];

const SIZES: [&str; 4] = ["Small", "Medium", "Large", "Extra Large"];
const AGES: [&str; 4] = ["Baby", "Young", "Adult", "Senior"];
const COATS: [&str; 5] = ["Short", "Medium", "Long", "Wire", "Curly"];

/// Generate `count` demo shelter dogs with the thread-local RNG
pub fn generate_demo_dogs(count: usize) -> Vec<AnimalRecord> {
    generate_demo_dogs_with(&mut rand::rng(), count)
}

/// Generate `count` demo shelter dogs from the given RNG
///
/// A seeded RNG yields the same catalog every time.
pub fn generate_demo_dogs_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<AnimalRecord> {
    let now = Utc::now();
    (1..=count).map(|n| demo_dog(rng, n, now)).collect()
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn demo_dog<R: Rng + ?Sized>(rng: &mut R, n: usize, now: chrono::DateTime<Utc>) -> AnimalRecord {
    let shelter = pick(rng, &SHELTERS);
    let breed = *pick(rng, &BREEDS);
    let is_mixed = breed == "Mixed Breed" || rng.random_bool(0.3);
    let name = *pick(rng, &NAMES);
    let size = *pick(rng, &SIZES);
    let age = *pick(rng, &AGES);
    let gender = if rng.random_bool(0.5) { "Male" } else { "Female" };
    let color = *pick(rng, &COLORS);
    let coat = *pick(rng, &COATS);

    // 2-4 distinct traits
    let wanted = rng.random_range(2..=4);
    let mut temperament: Vec<String> = Vec::with_capacity(wanted);
    while temperament.len() < wanted {
        let candidate = *pick(rng, &TEMPERAMENTS);
        if !temperament.iter().any(|t| t == candidate) {
            temperament.push(candidate.to_string());
        }
    }

    let attributes = Attributes {
        spayed_neutered: rng.random_bool(0.7),
        house_trained: rng.random_bool(0.6),
        declawed: false,
        special_needs: rng.random_bool(0.1),
        shots_current: rng.random_bool(0.8),
    };

    let environment = Environment {
        children: compatibility(rng, 0.6),
        dogs: compatibility(rng, 0.5),
        cats: compatibility(rng, 0.4),
    };

    let mut tags = Vec::new();
    if attributes.house_trained {
        tags.push("House-trained".to_string());
    }
    if attributes.shots_current {
        tags.push("Vaccinated".to_string());
    }
    if attributes.spayed_neutered {
        tags.push("Spayed/Neutered".to_string());
    }
    if attributes.special_needs {
        tags.push("Special needs".to_string());
    }
    if environment.children == Compatibility::Yes {
        tags.push("Kid-friendly".to_string());
    }

    let base_fee: i32 = match size {
        "Small" => 150,
        "Medium" => 175,
        "Large" => 200,
        _ => 225,
    };
    let fee = base_fee + rng.random_range(-25..25);

    let published_at = now - Duration::days(rng.random_range(0..90));
    let photo_id: u32 = rng.random_range(0..1000);

    let description = format!(
        "{} {} {} personality traits make them a joy to be around.",
        name,
        pick(rng, &DESCRIPTIONS),
        temperament.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
    );

    AnimalRecord {
        id: format!("demo_{}", n),
        name: Some(name.to_string()),
        breed: Some(breed.to_string()),
        breed_secondary: is_mixed.then(|| pick(rng, &BREEDS).to_string()),
        is_mixed,
        size: Some(size.to_string()),
        color: Some(color.to_string()),
        color_secondary: rng.random_bool(0.3).then(|| pick(rng, &COLORS).to_string()),
        color_tertiary: None,
        age: Some(AgeValue::from(age)),
        gender: Some(gender.to_string()),
        coat: Some(coat.to_string()),
        temperament,
        attributes,
        tags,
        environment,
        description: Some(description),
        photos: vec![Photo {
            small: Some(format!("https://placedog.net/300/300?random={}", photo_id)),
            medium: Some(format!("https://placedog.net/500/500?random={}", photo_id)),
            large: Some(format!("https://placedog.net/800/800?random={}", photo_id)),
            full: Some(format!("https://placedog.net/1200/1200?random={}", photo_id)),
        }],
        primary_photo: Some(format!("https://placedog.net/500/500?random={}", n - 1)),
        adoption_fee: Some(format!("${}", fee)),
        published_at: Some(published_at),
        status_changed_at: Some(published_at),
        distance: Some(rng.random_range(2.0..18.0)),
        shelter: Some(Shelter {
            id: shelter.id.to_string(),
            name: shelter.name.to_string(),
            email: Some(shelter.email.to_string()),
            phone: Some(shelter.phone.to_string()),
            address: Address {
                address1: Some(shelter.address1.to_string()),
                address2: None,
                city: Some(shelter.city.to_string()),
                state: Some("GA".to_string()),
                postcode: Some(shelter.postcode.to_string()),
                country: Some("US".to_string()),
            },
        }),
        url: Some(format!("https://example.com/adopt/{}", n)),
    }
}

/// Yes with probability `p_yes`, otherwise No 30% of the time and Unknown the rest
fn compatibility<R: Rng + ?Sized>(rng: &mut R, p_yes: f64) -> Compatibility {
    if rng.random_bool(p_yes) {
        Compatibility::Yes
    } else if rng.random_bool(0.3) {
        Compatibility::No
    } else {
        Compatibility::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::validate_batch;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let dogs = generate_demo_dogs(60);

        assert_eq!(dogs.len(), 60);
        assert_eq!(dogs[0].id, "demo_1");
        assert_eq!(dogs[59].id, "demo_60");
        assert!(validate_batch(&dogs).is_ok());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = generate_demo_dogs_with(&mut StdRng::seed_from_u64(7), 20);
        let second = generate_demo_dogs_with(&mut StdRng::seed_from_u64(7), 20);

        let names = |dogs: &[AnimalRecord]| dogs.iter().map(|d| d.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&first), names(&second));
        assert_eq!(first[3].breed, second[3].breed);
        assert_eq!(first[3].temperament, second[3].temperament);
    }

    #[test]
    fn test_demo_records_are_well_formed() {
        let dogs = generate_demo_dogs_with(&mut StdRng::seed_from_u64(42), 200);

        for dog in &dogs {
            assert!((2..=4).contains(&dog.temperament.len()));
            let mut unique = dog.temperament.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), dog.temperament.len());

            assert_eq!(dog.breed_secondary.is_some(), dog.is_mixed);
            assert_eq!(
                dog.tags.contains(&"Kid-friendly".to_string()),
                dog.environment.children == Compatibility::Yes
            );

            let distance = dog.distance.unwrap();
            assert!((2.0..18.0).contains(&distance));
            assert!(dog.published_at.unwrap() <= Utc::now());
            assert!(dog.adoption_fee.as_deref().unwrap().starts_with('$'));
        }

        assert!(dogs.iter().any(|d| d.is_mixed));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(generate_demo_dogs(0).is_empty());
    }
}
