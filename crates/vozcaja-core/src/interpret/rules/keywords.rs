//! Keyword tables for Spanish transcripts.
//!
//! All entries are lower-case. Matching against them happens on the
//! lower-cased transcript, so no other normalization is required.

use crate::models::transaction::Category;

/// Markers of money received. Checked before [`OUTFLOW_KEYWORDS`].
///
/// "pago" is also listed as an outflow marker; the inflow reading wins.
pub const INFLOW_KEYWORDS: &[&str] = &[
    "ingreso",
    "ingresó",
    "ingresaron",
    "ingresé",
    "ganancia",
    "gané",
    "ganó",
    "cobré",
    "cobro",
    "cobrar",
    "recibí",
    "recibo",
    "recibir",
    "entrada",
    "entró",
    "sueldo",
    "salario",
    "pago",
    "me pagaron",
    "me dieron",
    "deposit",
    "depósito",
    "deposite",
    "transfer",
    "transferencia",
    "venta",
    "vendí",
    "vendió",
    "factur",
    "factura",
    "honorario",
    "honorarios",
    "bonific",
    "bonificación",
    "premio",
    "gané un premio",
    "ahorro",
    "ahorré",
    "inversión",
    "invertí",
];

/// Markers of money spent.
pub const OUTFLOW_KEYWORDS: &[&str] = &[
    "egreso",
    "gasto",
    "gasté",
    "gastó",
    "pagué",
    "pago",
    "pagar",
    "compré",
    "compra",
    "comprar",
    "salida",
    "salió",
    "perdí",
    "pérdida",
    "deuda",
    "deud",
    "deber",
    "préstamo",
    "presté",
    "tarjeta",
    "tarjeta de crédito",
    "cuota",
    "mensualidad",
    "alquiler",
    "renta",
    "impuesto",
    "tributo",
    "multa",
    "sanción",
    "donación",
    "doné",
    "regalo",
    "regalé",
];

/// Direction keywords this short or shorter never count as a match.
pub const MIN_DIRECTION_KEYWORD_CHARS: usize = 3;

/// Currency nouns dropped from descriptions.
pub const CURRENCY_WORDS: &[&str] = &[
    "peso", "pesos", "dólar", "dólares", "dolar", "dolares", "euro", "euros", "sol", "soles",
];

/// Prepositions and conjunctions dropped from descriptions.
pub const CONNECTIVE_WORDS: &[&str] = &["de", "en", "por", "para", "con", "sin"];

/// Number words dropped from descriptions.
pub const DESCRIPTION_NUMBER_WORDS: &[&str] = &[
    "un", "una", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
    "diez", "mil", "miles", "ciento", "cientos",
];

/// Keyword lists per category, in scoring order.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "comida", "almuerzo", "cena", "desayuno", "restaurante", "supermercado", "mercado",
            "pizza", "hamburguesa", "sandwich", "ensalada", "fruta", "verdura", "carnicería",
            "panadería", "pastelería", "delivery", "pedidos ya", "rappi", "uber eats",
        ],
    ),
    (
        Category::Transport,
        &[
            "transporte", "taxi", "uber", "colectivo", "nafta", "combustible", "estacionamiento",
            "peaje", "subte", "tren", "metro", "bus", "ómnibus", "auto", "carro", "moto",
            "bicicleta", "patineta", "viaje", "pasaje", "boleto",
        ],
    ),
    (
        Category::Utilities,
        &[
            "internet", "luz", "agua", "gas", "teléfono", "celular", "netflix", "spotify",
            "cable", "wifi", "streaming", "disney", "hbo", "prime", "youtube", "cloud", "hosting",
            "dominio", "software", "app", "aplicación",
        ],
    ),
    (
        Category::Health,
        &[
            "médico", "farmacia", "medicamento", "doctor", "hospital", "clínica", "dentista",
            "medicina", "consultorio", "análisis", "laboratorio", "seguro", "obra social",
            "psicólogo", "psiquiatra", "terapia", "gimnasio", "nutricionista",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "cine", "teatro", "concierto", "salida", "bar", "fiesta", "juego", "videojuego",
            "parque", "museo", "exposición", "libro", "revista", "música", "película", "serie",
            "deporte", "fútbol", "cancha", "estadio",
        ],
    ),
    (
        Category::Education,
        &[
            "curso", "libro", "universidad", "colegio", "estudio", "escuela", "capacitación",
            "taller", "seminario", "conferencia", "diplomado", "maestría", "doctorado",
            "material", "útiles", "cuaderno", "lápiz", "computadora",
        ],
    ),
    (
        Category::Clothing,
        &[
            "ropa", "zapatos", "vestido", "camisa", "pantalón", "zapatillas", "remera", "chaqueta",
            "abrigo", "sombrero", "gorra", "bufanda", "guantes", "lencería", "calzado",
            "accesorio", "joyería", "reloj", "collar",
        ],
    ),
    (
        Category::Home,
        &[
            "casa", "alquiler", "mueble", "decoración", "electrodoméstico", "herramienta",
            "jardín", "pintura", "reparación", "limpieza", "mantenimiento", "cocina", "baño",
            "dormitorio", "living", "terraza", "balcón",
        ],
    ),
    (
        Category::Salary,
        &[
            "sueldo", "salario", "pago", "trabajo", "empleo", "nomina", "quincena", "mensualidad",
            "honorario", "contrato", "jornada",
        ],
    ),
    (
        Category::Freelance,
        &[
            "freelance", "proyecto", "cliente", "trabajo independiente", "consultoría",
            "asesoría", "desarrollo", "diseño", "redacción", "traducción",
        ],
    ),
    (
        Category::Investment,
        &[
            "inversión", "acciones", "bolsa", "cripto", "bitcoin", "ethereum", "fondo",
            "plazo fijo", "ahorro", "depósito", "banco",
        ],
    ),
    (
        Category::Gift,
        &["regalo", "obsequio", "donación", "ayuda", "caridad", "voluntariado"],
    ),
    (
        Category::Travel,
        &["viaje", "vacaciones", "hotel", "avión", "turismo", "excursión", "paseo", "camping"],
    ),
    (Category::Other, &[]),
];

/// Keywords for a category.
pub fn category_keywords(category: Category) -> &'static [&'static str] {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Whether a token is dropped when building a description.
pub fn is_description_stopword(token: &str) -> bool {
    INFLOW_KEYWORDS.contains(&token)
        || OUTFLOW_KEYWORDS.contains(&token)
        || CURRENCY_WORDS.contains(&token)
        || CONNECTIVE_WORDS.contains(&token)
        || DESCRIPTION_NUMBER_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_table() {
        for category in Category::ALL {
            assert!(CATEGORY_KEYWORDS.iter().any(|(c, _)| *c == category));
        }
        assert!(category_keywords(Category::Other).is_empty());
        assert!(category_keywords(Category::Food).contains(&"comida"));
    }

    #[test]
    fn test_tables_are_lower_case() {
        let all = INFLOW_KEYWORDS
            .iter()
            .chain(OUTFLOW_KEYWORDS)
            .chain(CATEGORY_KEYWORDS.iter().flat_map(|(_, k)| k.iter()));
        for keyword in all {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }

    #[test]
    fn test_stopwords() {
        assert!(is_description_stopword("gasté"));
        assert!(is_description_stopword("pesos"));
        assert!(is_description_stopword("de"));
        assert!(is_description_stopword("mil"));
        assert!(!is_description_stopword("comida"));
        assert!(!is_description_stopword("trabajo"));
    }
}
