// src/common/text.rs

/// Valor gravado no lugar de qualquer campo de texto ausente.
pub const NOT_SPECIFIED: &str = "Não especificado";

/// Chave de comparação do responsável: trim + minúsculas.
/// É a regra pública de casamento entre metas e vendas.
pub fn responsible_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normaliza um rótulo de coluna: trim, minúsculas, sem acentos e com
/// espaços internos colapsados ("Data  da Venda " -> "data da venda").
pub fn fold_label(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let folded: String = lowered.chars().map(strip_accent).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
