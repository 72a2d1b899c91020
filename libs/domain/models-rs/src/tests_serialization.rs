// [libs/domain/models-rs/src/tests_serialization.rs]
/**
 * =================================================================
 * APARATO: DOMAIN SERIALIZATION TEST (V12.0 - INTEGRATION LEVEL)
 * CLASIFICACIÓN: TRINITY EVIDENCE (ESTRATO L2-MODELS)
 * RESPONSABILIDAD: CERTIFICACIÓN DE PARIDAD JSON DEL ESLABÓN SOBERANO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FLAT LINE CONTRACT: Valida que el eslabón serialice a un objeto
 *    JSON plano (sobre + evento interno-tagged) apto para NDJSON.
 * 2. CLOSED SET SEAL: Certifica los discriminadores exactos de la
 *    taxonomía de eventos consumidos por la UI de transparencia.
 * =================================================================
 */
